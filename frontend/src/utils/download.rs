use thiserror::Error;

pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const PDF_MIME: &str = "application/pdf";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DownloadError {
    #[error("ファイルが空です")]
    Empty,
    #[error("ブラウザ環境ではありません")]
    Unsupported,
    #[error("ダウンロードの準備に失敗しました: {0}")]
    Dom(String),
}

/// Saves `bytes` through a temporary object URL and anchor click.
pub fn trigger_blob_download(filename: &str, mime: &str, bytes: &[u8]) -> Result<(), DownloadError> {
    if bytes.is_empty() {
        return Err(DownloadError::Empty);
    }
    save_blob(filename, mime, bytes)
}

#[cfg(target_arch = "wasm32")]
fn save_blob(filename: &str, mime: &str, bytes: &[u8]) -> Result<(), DownloadError> {
    use wasm_bindgen::JsCast;

    let dom = |what: &str| DownloadError::Dom(what.to_string());

    let array = js_sys::Array::new();
    array.push(&js_sys::Uint8Array::from(bytes));
    let props = web_sys::BlobPropertyBag::new();
    props.set_type(mime);
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&array, &props)
        .map_err(|_| dom("blob"))?;
    let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(|_| dom("object url"))?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or(DownloadError::Unsupported)?;
    let anchor = document
        .create_element("a")
        .map_err(|_| dom("anchor"))?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| dom("anchor cast"))?;
    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor.style().set_property("display", "none").ok();
    let body = document.body().ok_or_else(|| dom("body"))?;
    body.append_child(&anchor).map_err(|_| dom("append"))?;
    anchor.click();
    anchor.remove();
    let _ = web_sys::Url::revoke_object_url(&url);
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn save_blob(_filename: &str, _mime: &str, _bytes: &[u8]) -> Result<(), DownloadError> {
    Err(DownloadError::Unsupported)
}

/// `employees_20250301.xlsx` style names.
pub fn dated_filename(stem: &str, date: chrono::NaiveDate, extension: &str) -> String {
    format!("{}_{}.{}", stem, date.format("%Y%m%d"), extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn empty_payload_is_rejected() {
        assert_eq!(
            trigger_blob_download("a.pdf", PDF_MIME, &[]),
            Err(DownloadError::Empty)
        );
    }

    #[test]
    fn dated_filename_uses_compact_date() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        assert_eq!(dated_filename("employees", date, "xlsx"), "employees_20250301.xlsx");
    }
}
