use crate::extract::ExtractError;

pub(crate) fn pdf_to_text(data: &[u8]) -> Result<String, ExtractError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(data)
        .map_err(|err| ExtractError::Pdf(err.to_string()))?;
    Ok(join_pages(&pages))
}

/// Collapses each page's text runs onto one line separated by single spaces,
/// then separates pages with a blank line.
fn join_pages(pages: &[String]) -> String {
    let joined = pages
        .iter()
        .map(|page| join_runs(page))
        .collect::<Vec<_>>()
        .join("\n\n");
    joined.trim_end().to_string()
}

fn join_runs(page: &str) -> String {
    page.lines()
        .map(str::trim)
        .filter(|run| !run.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
