//! Attribute naming
//!
//! Kubernetes fields are camelCase (`rootCAs`, `bindDN`,
//! `disableUIOverHTTP`); Terraform attributes are snake_case.

/// Convert a camelCase field name into a Terraform attribute name
///
/// Acronyms stay together (`userDNMapping` becomes `user_dn_mapping`) and a
/// plural `s` trailing an acronym sticks to it (`rootCAs` becomes `root_cas`).
pub fn to_snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c == '-' || c == '.' {
            out.push('_');
            continue;
        }
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next = chars.get(i + 1).copied();
            let after_next = chars.get(i + 2).copied();
            let plural_suffix = next == Some('s') && after_next.is_none_or(|c| !c.is_lowercase());
            let boundary = prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next.is_some_and(char::is_lowercase) && !plural_suffix);
            if boundary && !out.ends_with('_') {
                out.push('_');
            }
        }
        out.extend(c.to_lowercase());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::to_snake_case;

    #[test]
    fn converts_plain_camel_case() {
        assert_eq!(to_snake_case("image"), "image");
        assert_eq!(to_snake_case("antiAffinity"), "anti_affinity");
        assert_eq!(to_snake_case("onlineVolumeExpansionTimeoutInMins"), "online_volume_expansion_timeout_in_mins");
    }

    #[test]
    fn keeps_acronyms_together() {
        assert_eq!(to_snake_case("rootCASecret"), "root_ca_secret");
        assert_eq!(to_snake_case("userDNMapping"), "user_dn_mapping");
        assert_eq!(to_snake_case("disableUIOverHTTP"), "disable_ui_over_http");
        assert_eq!(to_snake_case("disableUIOverHTTPS"), "disable_ui_over_https");
        assert_eq!(to_snake_case("useIAMRole"), "use_iam_role");
        assert_eq!(to_snake_case("bindDN"), "bind_dn");
        assert_eq!(to_snake_case("URLRewrite"), "url_rewrite");
    }

    #[test]
    fn plural_acronyms_stay_whole() {
        assert_eq!(to_snake_case("rootCAs"), "root_cas");
        assert_eq!(to_snake_case("serverCAs"), "server_cas");
    }

    #[test]
    fn digits_and_separators() {
        assert_eq!(to_snake_case("s3Secret"), "s3_secret");
        assert_eq!(to_snake_case("tlsMinimumVersion"), "tls_minimum_version");
        assert_eq!(to_snake_case("gateway.networking.k8s-io"), "gateway_networking_k8s_io");
        assert_eq!(to_snake_case("HTTPRoute"), "http_route");
        assert_eq!(to_snake_case("CouchbaseCluster"), "couchbase_cluster");
    }
}
