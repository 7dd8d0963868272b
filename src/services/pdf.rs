//! PDF text extraction via the `pdf-extract` crate.

use crate::error::PdfError;

/// Extract the full text of a PDF held in memory.
///
/// Page boundaries are not preserved; the chapterizer works on the flat text.
pub fn extract_text(data: &[u8]) -> Result<String, PdfError> {
    pdf_extract::extract_text_from_mem(data).map_err(|e| PdfError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_pdf_bytes() {
        // pdf-extract needs actual PDF bytes, so only the error path is
        // testable without a fixture file.
        let result = extract_text(b"This is not a PDF");
        assert!(result.is_err());
    }
}
