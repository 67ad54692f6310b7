// Copyright 2024 RustFS Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! OpenTelemetry [`Resource`] construction.

use crate::config::OtelConfig;
use crate::utils::get_local_ip_with_default;
use opentelemetry::KeyValue;
use opentelemetry_sdk::Resource;
use opentelemetry_semantic_conventions::{
    SCHEMA_URL,
    attribute::{DEPLOYMENT_ENVIRONMENT_NAME, NETWORK_LOCAL_ADDRESS, SERVICE_VERSION as OTEL_SERVICE_VERSION},
};
use shardmon_config::{ENVIRONMENT, SERVICE_NAME, SERVICE_VERSION};

/// Build the resource attached to every exported metric.
///
/// Carries `service.name`, `service.version`, `deployment.environment.name`
/// and `network.local.address`, falling back to the crate constants for
/// anything the config leaves unset.
pub(super) fn build_resource(config: &OtelConfig) -> Resource {
    Resource::builder()
        .with_service_name(config.service_name.as_deref().unwrap_or(SERVICE_NAME).to_string())
        .with_schema_url(
            [
                KeyValue::new(
                    OTEL_SERVICE_VERSION,
                    config.service_version.as_deref().unwrap_or(SERVICE_VERSION).to_string(),
                ),
                KeyValue::new(
                    DEPLOYMENT_ENVIRONMENT_NAME,
                    config.environment.as_deref().unwrap_or(ENVIRONMENT).to_string(),
                ),
                KeyValue::new(NETWORK_LOCAL_ADDRESS, get_local_ip_with_default()),
            ],
            SCHEMA_URL,
        )
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry::{Key, Value};

    #[test]
    fn test_build_resource_uses_config_values() {
        let config = OtelConfig {
            service_name: Some("shard-bridge".to_string()),
            environment: Some("staging".to_string()),
            ..OtelConfig::default()
        };
        let resource = build_resource(&config);
        assert_eq!(
            resource.get(&Key::from_static_str("service.name")),
            Some(Value::from("shard-bridge"))
        );
        assert_eq!(
            resource.get(&Key::from_static_str(DEPLOYMENT_ENVIRONMENT_NAME)),
            Some(Value::from("staging"))
        );
        assert!(resource.get(&Key::from_static_str(NETWORK_LOCAL_ADDRESS)).is_some());
    }

    #[test]
    fn test_build_resource_falls_back_to_constants() {
        let config = OtelConfig {
            service_name: None,
            service_version: None,
            environment: None,
            ..OtelConfig::default()
        };
        let resource = build_resource(&config);
        assert_eq!(
            resource.get(&Key::from_static_str("service.name")),
            Some(Value::from(SERVICE_NAME))
        );
        assert_eq!(
            resource.get(&Key::from_static_str(OTEL_SERVICE_VERSION)),
            Some(Value::from(SERVICE_VERSION))
        );
    }
}
