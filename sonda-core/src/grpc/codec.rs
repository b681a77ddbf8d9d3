//! # JSON <-> Protobuf Codec
//!
//! An implementation of `tonic::codec::Codec` that lets `tonic` transport
//! `serde_json::Value` directly, with no generated Rust structs involved.
//!
//! Encoding deserializes the JSON into a `prost_reflect::DynamicMessage` against the
//! request descriptor (which doubles as schema validation) and writes the Protobuf
//! bytes. Decoding reads the wire bytes into a `DynamicMessage` against the response
//! descriptor and serializes it back to a `serde_json::Value` for the report.
use prost::Message;
use prost_reflect::{DynamicMessage, MessageDescriptor};
use tonic::{
    Status,
    codec::{Codec, DecodeBuf, Decoder, EncodeBuf, Encoder},
};

/// A codec bridging `serde_json::Value` and the Protobuf binary format.
///
/// Holds the descriptors (schemas) for both the request and the response messages so
/// both directions can be transcoded dynamically.
pub struct JsonCodec {
    request: MessageDescriptor,
    response: MessageDescriptor,
}

impl JsonCodec {
    pub fn new(request: MessageDescriptor, response: MessageDescriptor) -> Self {
        Self { request, response }
    }
}

impl Codec for JsonCodec {
    type Encode = serde_json::Value;
    type Decode = serde_json::Value;

    type Encoder = JsonEncoder;
    type Decoder = JsonDecoder;

    fn encoder(&mut self) -> Self::Encoder {
        JsonEncoder {
            descriptor: self.request.clone(),
        }
    }

    fn decoder(&mut self) -> Self::Decoder {
        JsonDecoder {
            descriptor: self.response.clone(),
        }
    }
}

/// Encodes a JSON value into Protobuf bytes.
pub struct JsonEncoder {
    descriptor: MessageDescriptor,
}

impl Encoder for JsonEncoder {
    type Item = serde_json::Value;
    type Error = Status;

    fn encode(&mut self, item: Self::Item, dst: &mut EncodeBuf<'_>) -> Result<(), Self::Error> {
        // DynamicMessage::deserialize accepts any Serde Deserializer, and
        // serde_json::Value is one, so the JSON payload can be passed directly.
        let msg = DynamicMessage::deserialize(self.descriptor.clone(), item).map_err(|e| {
            Status::invalid_argument(format!(
                "JSON payload does not match the Protobuf schema: {e}"
            ))
        })?;

        msg.encode_raw(dst);
        Ok(())
    }
}

/// Decodes Protobuf bytes into a JSON value.
pub struct JsonDecoder {
    descriptor: MessageDescriptor,
}

impl Decoder for JsonDecoder {
    type Item = serde_json::Value;
    type Error = Status;

    fn decode(&mut self, src: &mut DecodeBuf<'_>) -> Result<Option<Self::Item>, Self::Error> {
        let mut msg = DynamicMessage::new(self.descriptor.clone());
        msg.merge(src)
            .map_err(|e| Status::internal(format!("Failed to decode Protobuf bytes: {e}")))?;

        let value = serde_json::to_value(&msg)
            .map_err(|e| Status::internal(format!("Failed to map the response to JSON: {e}")))?;

        Ok(Some(value))
    }
}
