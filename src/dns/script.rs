use crate::dns::types::{CommandScript, DnsAddress};

/// First line of every generated script; keeps the script's own commands out
/// of the console while it runs.
pub const ECHO_OFF: &str = "@echo off";

/// Builds the script that binds `address` as the primary DNS of every
/// interface in `interfaces`. Names are echoed verbatim (quoted, spaces and
/// all) in discovery order; an empty list yields a script with only the
/// echo-suppress directive.
pub fn build_apply_script(
    file_name: &str,
    interfaces: &[String],
    address: &DnsAddress,
) -> CommandScript {
    let mut lines = vec![ECHO_OFF.to_string()];
    for name in interfaces {
        lines.push(format!(
            "netsh interface ipv4 set dns name=\"{}\" static {} primary",
            name, address
        ));
    }
    CommandScript {
        file_name: file_name.to_string(),
        lines,
    }
}

/// Builds the script that reverts every interface in `interfaces` to
/// DHCP-sourced DNS. Same ordering and empty-list behavior as
/// [`build_apply_script`].
pub fn build_reset_script(file_name: &str, interfaces: &[String]) -> CommandScript {
    let mut lines = vec![ECHO_OFF.to_string()];
    for name in interfaces {
        lines.push(format!(
            "netsh interface ip set dns name=\"{}\" source=dhcp",
            name
        ));
    }
    CommandScript {
        file_name: file_name.to_string(),
        lines,
    }
}

/// Builds the script that lists all network interfaces, redirecting the
/// tabular output into `results_file` for the discovery parser.
pub fn build_list_script(file_name: &str, results_file: &str) -> CommandScript {
    CommandScript {
        file_name: file_name.to_string(),
        lines: vec![
            ECHO_OFF.to_string(),
            format!("netsh interface show interface > {}", results_file),
        ],
    }
}
