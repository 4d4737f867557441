use super::{exceeds_max_length, is_base64_body, KeyValidationError};

pub const PEM_HEADER: &str = "-----BEGIN PUBLIC KEY-----";
pub const PEM_FOOTER: &str = "-----END PUBLIC KEY-----";
/// Shortest base64 body accepted between the markers
pub const MIN_PEM_BODY_LENGTH: usize = 20;
/// Column width of the re-wrapped body
pub const PEM_LINE_WIDTH: usize = 64;

/// Validate and normalize a PEM `PUBLIC KEY` (SPKI) block.
///
/// The body is checked for base64 shape and a minimum length only; it is
/// not parsed as ASN.1. The result carries the canonical header and footer
/// with the body re-wrapped at [`PEM_LINE_WIDTH`] columns, joined by `\n`.
pub fn validate_pem(input: &str) -> Result<String, KeyValidationError> {
    if exceeds_max_length(input) {
        return Err(KeyValidationError::TooLong);
    }

    let block = input.trim();
    if !block.starts_with(PEM_HEADER) {
        return Err(KeyValidationError::MissingPemHeader);
    }
    if !block.ends_with(PEM_FOOTER) {
        return Err(KeyValidationError::MissingPemFooter);
    }

    let body = match (block.find('\n'), block.rfind('\n')) {
        (Some(first), Some(last)) if first < last => &block[first + 1..last],
        _ => return Err(KeyValidationError::MissingPemBody),
    };

    let body: String = body.chars().filter(|c| !matches!(c, '\r' | '\n')).collect();
    if body.is_empty() {
        return Err(KeyValidationError::MissingPemBody);
    }
    if !is_base64_body(&body) {
        return Err(KeyValidationError::InvalidBase64);
    }
    if body.len() < MIN_PEM_BODY_LENGTH {
        return Err(KeyValidationError::PemBodyTooShort(body.len()));
    }

    let mut lines = Vec::with_capacity(body.len() / PEM_LINE_WIDTH + 3);
    lines.push(PEM_HEADER);
    // body is pure ascii here, so byte offsets are char boundaries
    for start in (0..body.len()).step_by(PEM_LINE_WIDTH) {
        let end = (start + PEM_LINE_WIDTH).min(body.len());
        lines.push(&body[start..end]);
    }
    lines.push(PEM_FOOTER);

    Ok(lines.join("\n"))
}

#[cfg(test)]
mod test {
    use super::*;

    const BODY: &str = "MFkwEwYHKoZIzj0CAQYIKoZIzj0DAQcDQgAEq3Vb1xYz5mV0t2Qf3k8p9xJ0l7Yw4Rz8bS6nT1uC2aD5eF7gH9iJ0kL1mN2oP3qR4sT5uV6wX7yZ8aB9cD0eF1g==";

    fn block(body_lines: &[&str], newline: &str) -> String {
        let mut lines = vec![PEM_HEADER];
        lines.extend_from_slice(body_lines);
        lines.push(PEM_FOOTER);
        lines.join(newline)
    }

    #[test]
    fn test_single_line_body_is_rewrapped() {
        let normalized = validate_pem(&block(&[BODY], "\n")).unwrap();
        let lines: Vec<&str> = normalized.lines().collect();

        assert_eq!(lines.first(), Some(&PEM_HEADER));
        assert_eq!(lines.last(), Some(&PEM_FOOTER));
        let body_lines = &lines[1..lines.len() - 1];
        assert!(body_lines.iter().all(|l| l.len() <= PEM_LINE_WIDTH));
        assert!(body_lines[..body_lines.len() - 1]
            .iter()
            .all(|l| l.len() == PEM_LINE_WIDTH));
        assert_eq!(body_lines.concat(), BODY);
    }

    #[test]
    fn test_crlf_and_surrounding_whitespace() {
        let input = format!("\n  {}  \r\n", block(&[&BODY[..40], &BODY[40..]], "\r\n"));
        let normalized = validate_pem(&input).unwrap();
        assert!(!normalized.contains('\r'));
        assert_eq!(normalized, validate_pem(&block(&[BODY], "\n")).unwrap());
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let once = validate_pem(&block(&[BODY], "\n")).unwrap();
        assert_eq!(validate_pem(&once).unwrap(), once);
    }

    #[test]
    fn test_markers_are_required() {
        let no_header = format!("{}\n{}", BODY, PEM_FOOTER);
        assert_eq!(
            validate_pem(&no_header),
            Err(KeyValidationError::MissingPemHeader)
        );

        let no_footer = format!("{}\n{}", PEM_HEADER, BODY);
        assert_eq!(
            validate_pem(&no_footer),
            Err(KeyValidationError::MissingPemFooter)
        );

        let rsa = block(&[BODY], "\n").replace("PUBLIC KEY", "RSA PUBLIC KEY");
        assert_eq!(validate_pem(&rsa), Err(KeyValidationError::MissingPemHeader));
    }

    #[test]
    fn test_body_on_marker_line_is_rejected() {
        let one_line = format!("{}{}{}", PEM_HEADER, BODY, PEM_FOOTER);
        assert_eq!(
            validate_pem(&one_line),
            Err(KeyValidationError::MissingPemBody)
        );

        let empty = format!("{}\n{}", PEM_HEADER, PEM_FOOTER);
        assert_eq!(validate_pem(&empty), Err(KeyValidationError::MissingPemBody));

        let blank = format!("{}\n\r\n{}", PEM_HEADER, PEM_FOOTER);
        assert_eq!(validate_pem(&blank), Err(KeyValidationError::MissingPemBody));
    }

    #[test]
    fn test_invalid_body() {
        assert_eq!(
            validate_pem(&block(&["not base64 at all!!"], "\n")),
            Err(KeyValidationError::InvalidBase64)
        );
        assert_eq!(
            validate_pem(&block(&["AAAAAAAAAA"], "\n")),
            Err(KeyValidationError::PemBodyTooShort(10))
        );
    }

    #[test]
    fn test_minimum_body_length() {
        let shortest = "A".repeat(MIN_PEM_BODY_LENGTH);
        assert_eq!(
            validate_pem(&block(&[&shortest], "\n")).unwrap(),
            block(&[&shortest], "\n")
        );
        assert_eq!(
            validate_pem(&block(&[&shortest[1..]], "\n")),
            Err(KeyValidationError::PemBodyTooShort(19))
        );
    }

    #[test]
    fn test_block_at_length_limit_is_accepted() {
        let overhead = block(&[""], "\n").len();
        let body = "A".repeat(5000 - overhead);
        let at_limit = block(&[&body], "\n");
        assert_eq!(at_limit.chars().count(), 5000);
        assert!(validate_pem(&at_limit).is_ok());
        assert_eq!(
            validate_pem(&format!("{} ", at_limit)),
            Err(KeyValidationError::TooLong)
        );
    }

    #[test]
    fn test_oversized_block_is_rejected() {
        let huge = block(&[&"A".repeat(5000)], "\n");
        assert_eq!(validate_pem(&huge), Err(KeyValidationError::TooLong));
    }
}
