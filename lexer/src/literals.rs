/// Parse a decimal integer literal
pub fn parse_int_literal(text: &str) -> Result<i64, String> {
    text.parse::<i64>()
        .map_err(|_| format!("Integer literal out of range: {}", text))
}
