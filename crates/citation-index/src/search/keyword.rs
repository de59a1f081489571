use anyhow::Result;
use tantivy::collector::TopDocs;
use tantivy::query::QueryParser;
use tantivy::schema::*;
use tantivy::{Index, IndexReader, IndexWriter, ReloadPolicy, TantivyDocument};

use crate::document::ReferenceDocument;

/// Writer heap budget used when indexing reference texts
const WRITER_HEAP_BYTES: usize = 50_000_000;

/// In-memory BM25 index over reference texts
///
/// # Schema
///
/// - `id`: reference file name (STRING | STORED)
/// - `title`: file stem with separators turned into spaces (TEXT | STORED)
/// - `content`: reference text (TEXT | STORED)
///
/// # Example
///
/// ```
/// use citation_index::document::ReferenceDocument;
/// use citation_index::search::KeywordIndex;
///
/// # fn main() -> anyhow::Result<()> {
/// let index = KeywordIndex::in_memory()?;
/// index.add_documents(&[ReferenceDocument::new(
///     "ubo_declaration_form.txt",
///     "Beneficial Ownership Regulations 2018",
/// )])?;
/// let hits = index.search("beneficial ownership", 1)?;
/// assert_eq!(hits[0].0, "ubo_declaration_form.txt");
/// # Ok(())
/// # }
/// ```
pub struct KeywordIndex {
    index: Index,
    id_field: Field,
    title_field: Field,
    content_field: Field,
}

impl KeywordIndex {
    /// Create an empty index held entirely in RAM
    pub fn in_memory() -> Result<Self> {
        let mut schema_builder = Schema::builder();

        let id_field = schema_builder.add_text_field("id", STRING | STORED);
        let title_field = schema_builder.add_text_field("title", TEXT | STORED);
        let content_field = schema_builder.add_text_field("content", TEXT | STORED);

        let schema = schema_builder.build();
        let index = Index::create_in_ram(schema);

        Ok(Self {
            index,
            id_field,
            title_field,
            content_field,
        })
    }

    /// Build an index over `references`
    pub fn build(references: &[ReferenceDocument]) -> Result<Self> {
        let index = Self::in_memory()?;
        index.add_documents(references)?;
        Ok(index)
    }

    /// Add reference texts and commit them in a single batch
    pub fn add_documents(&self, references: &[ReferenceDocument]) -> Result<()> {
        let mut index_writer: IndexWriter = self.index.writer(WRITER_HEAP_BYTES)?;

        for reference in references {
            let mut doc = TantivyDocument::new();
            doc.add_text(self.id_field, &reference.file_name);
            doc.add_text(self.title_field, title_from_file_name(&reference.file_name));
            doc.add_text(self.content_field, &reference.content);
            index_writer.add_document(doc)?;
        }

        index_writer.commit()?;
        Ok(())
    }

    /// Search title and content, returning `(file name, raw BM25 score)` by
    /// descending score.
    ///
    /// Free text is parsed leniently: characters that are query syntax are
    /// ignored instead of failing the search.
    pub fn search(&self, query: &str, limit: usize) -> Result<Vec<(String, f32)>> {
        let reader: IndexReader = self
            .index
            .reader_builder()
            .reload_policy(ReloadPolicy::OnCommitWithDelay)
            .try_into()?;

        let searcher = reader.searcher();
        let query_parser =
            QueryParser::for_index(&self.index, vec![self.title_field, self.content_field]);
        let (query, _errors) = query_parser.parse_query_lenient(query);

        let top_docs = searcher.search(&query, &TopDocs::with_limit(limit))?;

        let mut results = Vec::with_capacity(top_docs.len());
        for (score, doc_address) in top_docs {
            let doc: TantivyDocument = searcher.doc(doc_address)?;
            let id = doc
                .get_first(self.id_field)
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string();
            results.push((id, score));
        }

        Ok(results)
    }
}

fn title_from_file_name(file_name: &str) -> String {
    file_name
        .trim_end_matches(".txt")
        .replace(['_', '-'], " ")
}
