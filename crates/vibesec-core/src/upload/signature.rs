//! Content sniffing by leading magic bytes.

use serde::Serialize;

/// What the first bytes of a file say it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentSignature {
    /// `MZ` header (PE/DOS executable).
    Executable,
    Jpeg,
    Png,
    Gif,
    Pdf,
    Unknown,
}

const SIGNATURES: &[(ContentSignature, &[u8])] = &[
    (ContentSignature::Jpeg, &[0xFF, 0xD8, 0xFF]),
    (
        ContentSignature::Png,
        &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A],
    ),
    (ContentSignature::Gif, b"GIF8"),
    (ContentSignature::Pdf, b"%PDF"),
];

/// Number of leading bytes [`sniff`] looks at.
pub const SNIFF_LEN: usize = 16;

impl ContentSignature {
    /// MIME type the signature corresponds to, if it is a known good type.
    pub fn mime(self) -> Option<&'static str> {
        match self {
            ContentSignature::Jpeg => Some("image/jpeg"),
            ContentSignature::Png => Some("image/png"),
            ContentSignature::Gif => Some("image/gif"),
            ContentSignature::Pdf => Some("application/pdf"),
            ContentSignature::Executable | ContentSignature::Unknown => None,
        }
    }
}

/// Classify `head` (the start of a file). The executable check wins over
/// every other signature.
pub fn sniff(head: &[u8]) -> ContentSignature {
    let head = &head[..head.len().min(SNIFF_LEN)];
    if head.starts_with(b"MZ") {
        return ContentSignature::Executable;
    }
    SIGNATURES
        .iter()
        .find(|(_, magic)| head.starts_with(magic))
        .map(|(sig, _)| *sig)
        .unwrap_or(ContentSignature::Unknown)
}

/// Declared MIME type for a file name, the way a browser would fill in
/// `File.type` from the extension.
pub fn guess_mime(name: &str) -> &'static str {
    match extension(name).as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("txt") => "text/plain",
        Some("pdf") => "application/pdf",
        Some("html" | "htm") => "text/html",
        Some("js") => "text/javascript",
        Some("exe" | "com" | "scr" | "pif") => "application/x-msdownload",
        Some("bat" | "cmd") => "application/x-bat",
        Some("jar") => "application/java-archive",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// Lowercased text after the last `.` of the final path component.
/// `None` when the name has no dot or ends with one.
pub fn extension(name: &str) -> Option<String> {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let (_, ext) = base.rsplit_once('.')?;
    if ext.is_empty() {
        None
    } else {
        Some(ext.to_ascii_lowercase())
    }
}
