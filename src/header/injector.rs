use log::trace;

use super::template::HeaderTemplate;
use crate::error::{LicenseError, LicenseResult};

/// Marker that starts an interpreter directive line
pub const SHEBANG: &[u8] = b"#!";

/// Compute new file content with the header inserted
///
/// A leading `#!` line stays the first line, followed by a blank line and the
/// header. Callers gate on [`is_compliant`](super::detector::is_compliant);
/// this function does not skip content that already has the header.
pub fn inject(content: &[u8], template: &HeaderTemplate) -> LicenseResult<Vec<u8>> {
    if content.is_empty() {
        return Err(LicenseError::MalformedFile);
    }
    let first = content
        .split_inclusive(|&b| b == b'\n')
        .next()
        .ok_or(LicenseError::MalformedFile)?;
    let header = template.as_bytes();

    let mut out = Vec::with_capacity(content.len() + header.len() + 4);

    if first.starts_with(SHEBANG) {
        trace!("Keeping interpreter directive above the header");
        out.extend_from_slice(first);
        if !first.ends_with(b"\n") {
            out.push(b'\n');
        }
        out.push(b'\n');
        out.extend_from_slice(header);
        out.push(b'\n');

        let rest = &content[first.len()..];
        if !rest.starts_with(b"\n") {
            out.push(b'\n');
        }
        out.extend_from_slice(rest);
    } else {
        out.extend_from_slice(header);
        out.extend_from_slice(b"\n\n\n");
        out.extend_from_slice(content);
    }

    Ok(out)
}
