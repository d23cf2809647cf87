/// Number of characters sent to the model per request.
pub const CHUNK_SIZE: usize = 500;

/// Splits `text` into consecutive windows of at most `size` characters.
///
/// Windows never overlap and ignore word boundaries. Only the last one may be
/// shorter than `size`.
pub fn chunk_text(text: &str, size: usize) -> Chunks<'_> {
    assert!(size > 0, "chunk size must be positive");
    Chunks { rest: text, size }
}

#[derive(Debug, Clone)]
pub struct Chunks<'a> {
    rest: &'a str,
    size: usize,
}

impl<'a> Iterator for Chunks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }
        let end = self
            .rest
            .char_indices()
            .nth(self.size)
            .map_or(self.rest.len(), |(idx, _)| idx);
        let (chunk, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(chunk)
    }
}
