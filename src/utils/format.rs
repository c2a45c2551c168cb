/// Format an account address for display (shortened)
pub fn format_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    let len = chars.len();
    if len <= 12 {
        return address.to_string();
    }

    let head: String = chars[..6].iter().collect();
    let tail: String = chars[len - 6..].iter().collect();
    format!("{}...{}", head, tail)
}
