//! Small utility helpers used across modules.

/// True if a spoken label reads as a number ("5", "2.5").
/// Decides the phrasing of the correction message.
pub fn is_numeric_label(s: &str) -> bool {
  s.trim().parse::<f64>().map(|v| !v.is_nan()).unwrap_or(false)
}

/// Log-safe truncation for large strings.
/// Avoids spamming logs with huge client payloads.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.len() <= max {
    return s.to_string();
  }
  let mut cut = max;
  while !s.is_char_boundary(cut) {
    cut -= 1;
  }
  format!("{}… ({} bytes total)", &s[..cut], s.len())
}
