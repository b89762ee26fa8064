//! The manual upload page.
//!
//! The page is embedded in the binary for easy deployment: a single file
//! input that POSTs the chosen export's text to the import endpoint and
//! renders the JSON result.

use axum::response::Html;

/// The upload page markup.
const UPLOAD_PAGE: &str = r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Upload events</title>
<style>
  body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    background: #111;
    color: #fff;
    max-width: 480px;
    margin: 0 auto;
    padding: 2rem;
  }
  h1 { font-size: 1.5rem; margin-bottom: 0.5rem; }
  p.subtitle { color: #888; font-size: 0.9rem; margin-bottom: 1.5rem; }
  form { display: flex; flex-direction: column; gap: 1rem; }
  input[type=file] {
    padding: 0.75rem;
    border: 1px solid #333;
    border-radius: 8px;
    background: #1a1a1a;
    color: #fff;
    font-size: 0.9rem;
  }
  button {
    padding: 0.75rem 1.25rem;
    background: #6366f1;
    color: #fff;
    border: none;
    border-radius: 8px;
    font-size: 1rem;
    cursor: pointer;
  }
  button:disabled { background: #444; cursor: not-allowed; }
  #result { padding: 0.75rem; border-radius: 8px; font-size: 0.9rem; display: none; }
  #result.ok { background: rgba(34, 197, 94, 0.15); color: #4ade80; display: block; }
  #result.error { background: rgba(239, 68, 68, 0.15); color: #f87171; display: block; }
</style>
</head>
<body>
<h1>Upload events CSV</h1>
<p class="subtitle">Choose the side-event sheet export (CSV or TSV). Importing replaces the stored event set.</p>
<form id="upload-form">
  <input type="file" id="file" accept=".csv,.tsv,.txt" required>
  <button type="submit" id="submit">Import to database</button>
</form>
<div id="result"></div>
<script>
  const form = document.getElementById('upload-form');
  const fileInput = document.getElementById('file');
  const submit = document.getElementById('submit');
  const result = document.getElementById('result');

  form.addEventListener('submit', async (e) => {
    e.preventDefault();
    const file = fileInput.files[0];
    if (!file) return;
    submit.disabled = true;
    submit.textContent = 'Importing…';
    result.className = '';
    try {
      const body = await file.text();
      const res = await fetch('/api/events/import', {
        method: 'POST',
        headers: { 'Content-Type': 'text/csv' },
        body,
      });
      const data = await res.json();
      if (data.ok) {
        result.className = 'ok';
        result.textContent = 'Imported ' + (data.imported ?? 0) + ' events.' +
          (data.parseErrors ? ' ' + data.parseErrors.join(' ') : '');
      } else {
        result.className = 'error';
        result.textContent = data.error ?? 'Import failed.';
      }
    } catch (err) {
      result.className = 'error';
      result.textContent = String(err);
    } finally {
      submit.disabled = false;
      submit.textContent = 'Import to database';
    }
  });
</script>
</body>
</html>
"#;

/// `GET /upload` - serves the embedded upload page.
pub async fn upload_page_handler() -> Html<&'static str> {
    Html(UPLOAD_PAGE)
}
