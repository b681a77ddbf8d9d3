mod common;

use common::StaticHealthService;
use sonda_core::reflection::{ReflectionClient, ReflectionError};
use tonic::Code;
use tonic_health::pb::health_server::HealthServer;

#[tokio::test]
async fn lists_services_registered_with_the_reflection_server() {
    let service = tonic_reflection::server::Builder::configure()
        .register_encoded_file_descriptor_set(tonic_health::pb::FILE_DESCRIPTOR_SET)
        .build_v1()
        .unwrap();

    let mut client = ReflectionClient::new(service);
    let services = client.list_services().await.unwrap();

    assert!(services.contains(&"grpc.health.v1.Health".to_string()));
    assert!(services.contains(&"grpc.reflection.v1.ServerReflection".to_string()));
}

#[tokio::test]
async fn stream_init_fails_against_a_server_without_reflection() {
    let service = HealthServer::new(StaticHealthService);

    let mut client = ReflectionClient::new(service);
    let err = client.list_services().await.unwrap_err();

    match err {
        ReflectionError::ServerStreamInitFailed(status) => {
            assert_eq!(status.code(), Code::Unimplemented);
        }
        other => panic!("expected stream init failure, got {other:?}"),
    }
}
