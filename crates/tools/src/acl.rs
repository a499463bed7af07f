//! Extended ACL generator.

pub const ACL_FORMAT_HINT: &str =
    "Error: Format should be 'permit|deny,source_ip,dest_ip,protocol,port'";

/// Render an extended ACL from `permit|deny,source,dest,protocol,port`.
///
/// The ACL ends with an explicit logged deny and is applied inbound on
/// GigabitEthernet0/1.
pub fn generate_acl(params: &str) -> String {
    let parts: Vec<&str> = params.split(',').map(str::trim).collect();
    let [action, source, dest, protocol, port] = parts.as_slice() else {
        return ACL_FORMAT_HINT.to_string();
    };

    format!(
        "Generated ACL:\n\nip access-list extended GENERATED_ACL\n {action} {protocol} {source} any {dest} any eq {port}\n deny ip any any log\n!\ninterface GigabitEthernet0/1\n ip access-group GENERATED_ACL in\n"
    )
}
