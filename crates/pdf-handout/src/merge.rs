//! Document concatenation
//!
//! Pages are copied object-for-object into a fresh document: content
//! streams, resources and page boxes are preserved, nothing is re-rendered
//! or scaled. Attributes a page inherited from its old page tree are
//! written onto the page itself.

use crate::constants::PDF_VERSION;
use crate::io::{load_pdf, write_pdf};
use crate::render::{INHERITABLE_ATTRIBUTES, copy_object_deep, finish_page_tree, inherited_attribute};
use crate::types::*;
use lopdf::{Dictionary, Document, Object, ObjectId};
use std::collections::HashMap;
use std::path::Path;

/// Concatenate the index document's pages followed by the content
/// document's pages.
pub fn merge(index: &Document, content: &Document) -> Result<Document> {
    merge_documents(&[index, content])
}

/// Concatenate documents in the given order
pub fn merge_documents(documents: &[&Document]) -> Result<Document> {
    let mut output = Document::with_version(PDF_VERSION);
    let pages_tree_id = output.new_object_id();
    let mut page_refs = Vec::new();

    for source in documents {
        append_pages(&mut output, source, pages_tree_id, &mut page_refs)?;
    }

    log::debug!(
        "Merged {} documents into {} pages",
        documents.len(),
        page_refs.len()
    );
    finish_page_tree(&mut output, pages_tree_id, page_refs);
    Ok(output)
}

/// Merge two documents on disk into `output`.
///
/// Either source failing to load, or the output failing to write, is
/// reported with the role of the document involved.
pub async fn merge_files(
    index_path: impl AsRef<Path>,
    content_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
) -> Result<usize> {
    let index = load_pdf(index_path).await.map_err(|e| merge_error(DocumentRole::Index, e))?;
    let content = load_pdf(content_path)
        .await
        .map_err(|e| merge_error(DocumentRole::Content, e))?;

    merge_and_write(index, content, output_path.as_ref()).await
}

/// Merge two loaded documents and write the result, returning its page count
pub async fn merge_and_write(
    index: Document,
    content: Document,
    output_path: &Path,
) -> Result<usize> {
    let merged = tokio::task::spawn_blocking(move || merge(&index, &content)).await??;
    let page_count = merged.get_pages().len();

    write_pdf(merged, output_path)
        .await
        .map_err(|e| merge_error(DocumentRole::Output, e))?;
    log::info!("Merged {} pages into {}", page_count, output_path.display());
    Ok(page_count)
}

fn merge_error(role: DocumentRole, source: HandoutError) -> HandoutError {
    HandoutError::Merge {
        role,
        source: Box::new(source),
    }
}

fn append_pages(
    output: &mut Document,
    source: &Document,
    pages_tree_id: ObjectId,
    page_refs: &mut Vec<Object>,
) -> Result<()> {
    let page_ids: Vec<ObjectId> = source.get_pages().values().copied().collect();

    // Pre-assign output IDs so references between pages stay inside the copy
    let mut cache: HashMap<ObjectId, ObjectId> = HashMap::new();
    for &page_id in &page_ids {
        cache.insert(page_id, output.new_object_id());
    }

    for page_id in page_ids {
        let page_dict = source.get_dictionary(page_id)?;

        let mut new_page = Dictionary::new();
        for (key, value) in page_dict.iter() {
            if key.as_slice() == b"Parent" {
                continue;
            }
            new_page.set(key.clone(), copy_object_deep(output, source, value, &mut cache)?);
        }

        for &key in INHERITABLE_ATTRIBUTES {
            if new_page.has(key) {
                continue;
            }
            if let Some(value) = inherited_attribute(source, page_id, key) {
                let value = value.clone();
                new_page.set(key, copy_object_deep(output, source, &value, &mut cache)?);
            }
        }

        new_page.set("Parent", Object::Reference(pages_tree_id));

        let new_id = cache[&page_id];
        output.objects.insert(new_id, Object::Dictionary(new_page));
        page_refs.push(Object::Reference(new_id));
    }

    Ok(())
}
