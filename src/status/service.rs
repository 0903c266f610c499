//! Service EXTERNAL-IP column

use k8s_openapi::api::core::v1::Service;

const NONE: &str = "-";
const PENDING: &str = "<pending>";

/// Derive the external address of a service
///
/// LoadBalancer services report their ingress addresses (or `<pending>`
/// until one is assigned), ExternalName services their DNS name, and
/// ClusterIP/NodePort services any manually set `externalIPs`.
pub fn resolve_external_ip(service: &Service) -> String {
    let spec = service.spec.as_ref();

    match spec.and_then(|s| s.type_.as_deref()) {
        Some("LoadBalancer") => {
            let addresses: Vec<&str> = service
                .status
                .as_ref()
                .and_then(|s| s.load_balancer.as_ref())
                .and_then(|lb| lb.ingress.as_ref())
                .map(|ingress| {
                    ingress
                        .iter()
                        .filter_map(|i| {
                            let ip = i.ip.as_deref().filter(|a| !a.is_empty());
                            ip.or(i.hostname.as_deref().filter(|a| !a.is_empty()))
                        })
                        .collect()
                })
                .unwrap_or_default();

            if addresses.is_empty() {
                PENDING.to_string()
            } else {
                addresses.join(", ")
            }
        }
        Some("ExternalName") => spec
            .and_then(|s| s.external_name.clone())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| NONE.to_string()),
        Some("NodePort" | "ClusterIP") => match spec.and_then(|s| s.external_ips.as_ref()) {
            Some(ips) if !ips.is_empty() => ips.join(", "),
            _ => NONE.to_string(),
        },
        _ => NONE.to_string(),
    }
}
