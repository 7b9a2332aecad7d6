//! Context string assembly

use super::entities::Document;

/// Separator placed between document blocks.
pub const BLOCK_SEPARATOR: &str = "\n\n";

/// Flatten documents into the grounding text sent to the completion backend.
///
/// Blocks keep the order the index returned them in; no re-ranking and no
/// count limit is applied here. An empty slice yields an empty string.
pub fn assemble_context(documents: &[Document]) -> String {
    documents
        .iter()
        .map(Document::context_block)
        .collect::<Vec<_>>()
        .join(BLOCK_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_document() {
        let docs = vec![Document::new("1", "HR.pdf", "Employees get 20 days...")];
        assert_eq!(assemble_context(&docs), "HR.pdf:\nEmployees get 20 days...");
    }

    #[test]
    fn test_order_is_preserved() {
        let docs = vec![
            Document::new("a", "A.docx", "alpha"),
            Document::new("b", "B.docx", "beta"),
        ];
        let context = assemble_context(&docs);
        assert_eq!(context, "A.docx:\nalpha\n\nB.docx:\nbeta");

        let a_end = context.find("alpha").unwrap() + "alpha".len();
        let b_start = context.find("B.docx").unwrap();
        assert!(a_end <= b_start);
    }

    #[test]
    fn test_empty_summary_keeps_header() {
        let docs = vec![Document::new("1", "Budget.xlsx", "")];
        assert_eq!(assemble_context(&docs), "Budget.xlsx:\n");
    }

    #[test]
    fn test_no_documents() {
        assert_eq!(assemble_context(&[]), "");
    }
}
