use crate::dns::system::SystemOps;
use crate::dns::types::DnsAddress;

/// Checks that `candidate` is exactly four dot-separated decimal octets in
/// [0, 255] whose canonical re-serialization equals the input. Leading
/// zeros, surrounding whitespace and non-decimal tokens are all rejected,
/// even when they would parse.
pub fn is_valid_ipv4(candidate: &str) -> bool {
    let octets: Vec<&str> = candidate.split('.').collect();
    if octets.len() != 4 {
        return false;
    }

    let mut values = [0u32; 4];
    for (i, octet) in octets.iter().enumerate() {
        match octet.parse::<u32>() {
            Ok(value) if value <= 255 => values[i] = value,
            _ => return false,
        }
    }

    let canonical = format!("{}.{}.{}.{}", values[0], values[1], values[2], values[3]);
    canonical == candidate
}

/// Full validation of a candidate address: the syntactic check above, then a
/// reachability probe. A probe error reads as unreachable, never as a
/// failure of the validator itself.
pub async fn validate(candidate: &str, sys: &dyn SystemOps) -> Option<DnsAddress> {
    if !is_valid_ipv4(candidate) {
        return None;
    }
    if !sys.probe(candidate).await {
        return None;
    }
    Some(DnsAddress::new_unchecked(candidate.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dns::discovery::DiscoveryError;
    use crate::dns::executor::ExecutionError;
    use crate::dns::fetch::FetchError;
    use crate::dns::types::{Browser, CommandScript};
    use async_trait::async_trait;

    struct FixedProbe(bool);

    #[async_trait]
    impl SystemOps for FixedProbe {
        async fn fetch_text(&self, _url: &str) -> Result<String, FetchError> {
            unimplemented!("not used by validation")
        }

        async fn probe(&self, _address: &str) -> bool {
            self.0
        }

        async fn list_interfaces(&self) -> Result<String, DiscoveryError> {
            unimplemented!("not used by validation")
        }

        async fn run_script(&self, _script: &CommandScript) -> Result<(), ExecutionError> {
            unimplemented!("not used by validation")
        }

        async fn launch_browser(&self, _browser: Browser, _url: &str) -> Result<(), ExecutionError> {
            unimplemented!("not used by validation")
        }
    }

    #[test]
    fn test_is_valid_ipv4() {
        assert!(is_valid_ipv4("8.8.8.8"));
        assert!(is_valid_ipv4("1.1.1.1"));
        assert!(is_valid_ipv4("192.168.1.1"));
        assert!(is_valid_ipv4("0.0.0.0"));
        assert!(is_valid_ipv4("255.255.255.255"));
    }

    #[test]
    fn test_rejects_wrong_arity() {
        assert!(!is_valid_ipv4("8.8.8"));
        assert!(!is_valid_ipv4("8.8.8.8.8"));
        assert!(!is_valid_ipv4(""));
        assert!(!is_valid_ipv4("..."));
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(!is_valid_ipv4("256.0.0.1"));
        assert!(!is_valid_ipv4("8.8.8.999"));
    }

    #[test]
    fn test_rejects_non_canonical_forms() {
        // These would all parse octet by octet but do not round-trip.
        assert!(!is_valid_ipv4("8.8.8.08"));
        assert!(!is_valid_ipv4("192.168.001.1"));
        assert!(!is_valid_ipv4("8.8.8.8 "));
        assert!(!is_valid_ipv4(" 8.8.8.8"));
        assert!(!is_valid_ipv4("8.8.8.+8"));
    }

    #[test]
    fn test_rejects_non_decimal_tokens() {
        assert!(!is_valid_ipv4("a.b.c.d"));
        assert!(!is_valid_ipv4("8.8.8.eight"));
        assert!(!is_valid_ipv4("2001:4860:4860::8888"));
    }

    #[tokio::test]
    async fn test_validate_requires_reachability() {
        assert!(validate("8.8.8.8", &FixedProbe(false)).await.is_none());

        let address = validate("8.8.8.8", &FixedProbe(true)).await;
        assert_eq!(address.map(|a| a.to_string()), Some("8.8.8.8".to_string()));
    }

    #[tokio::test]
    async fn test_validate_skips_probe_on_bad_syntax() {
        // The probe would answer true, but syntax fails first.
        assert!(validate("256.0.0.1", &FixedProbe(true)).await.is_none());
    }
}
