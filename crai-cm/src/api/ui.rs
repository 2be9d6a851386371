//! Review page handler
//!
//! Single embedded page exercising the API: submit a comment, list the
//! analysis history newest-first with poster, subject, and verdict.

use axum::{
    response::{Html, IntoResponse},
    routing::get,
    Router,
};

use crate::AppState;

/// GET /ui
///
/// Comment review page: submission form plus analyzed-comment cards.
pub async fn review_page() -> impl IntoResponse {
    let version = env!("CARGO_PKG_VERSION");

    let html = format!(
        r#"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>CRAI Comment Review</title>
    <style>
        * {{
            margin: 0;
            padding: 0;
            box-sizing: border-box;
        }}
        body {{
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            background-color: #1a1a1a;
            color: #e0e0e0;
            line-height: 1.6;
        }}
        header {{
            background-color: #2a2a2a;
            border-bottom: 1px solid #3a3a3a;
            padding: 20px;
            margin-bottom: 30px;
        }}
        h1 {{
            font-size: 26px;
            margin-bottom: 5px;
            color: #4a9eff;
        }}
        .subtitle {{
            color: #888;
            font-size: 16px;
        }}
        .version {{
            float: right;
            color: #888;
            font-family: 'Courier New', monospace;
            font-size: 14px;
        }}
        .container {{
            padding: 0 20px 40px 20px;
            max-width: 1300px;
            margin: 0 auto;
        }}
        .submit-panel {{
            background-color: #2a2a2a;
            border: 1px solid #3a3a3a;
            border-radius: 10px;
            padding: 20px;
            margin-bottom: 30px;
        }}
        textarea {{
            width: 100%;
            min-height: 90px;
            background-color: #1a1a1a;
            color: #e0e0e0;
            border: 1px solid #3a3a3a;
            border-radius: 6px;
            padding: 10px;
            font-size: 15px;
            resize: vertical;
        }}
        button {{
            margin-top: 12px;
            background-color: #4a9eff;
            color: #fff;
            border: none;
            border-radius: 6px;
            padding: 10px 22px;
            font-size: 15px;
            font-weight: 600;
            cursor: pointer;
        }}
        button:disabled {{
            background-color: #3a3a3a;
            cursor: wait;
        }}
        #status {{
            margin-top: 10px;
            font-size: 14px;
            color: #888;
        }}
        #status.error {{
            color: #ef4444;
        }}
        .cards {{
            display: flex;
            flex-wrap: wrap;
            gap: 20px;
        }}
        .card {{
            border: 2px solid #10b981;
            border-radius: 10px;
            background-color: #2a2a2a;
            padding: 15px;
            width: 400px;
            display: flex;
            gap: 15px;
        }}
        .card.rejected {{
            border-color: #ef4444;
        }}
        .card img, .card .no-poster {{
            width: 100px;
            height: 150px;
            object-fit: cover;
            border-radius: 4px;
            flex-shrink: 0;
        }}
        .card .no-poster {{
            background-color: #3a3a3a;
            color: #888;
            text-align: center;
            line-height: 150px;
            font-size: 13px;
        }}
        .card p {{
            margin-bottom: 6px;
            font-size: 14px;
        }}
        .verdict-approved {{
            color: #10b981;
            font-weight: 600;
        }}
        .verdict-rejected {{
            color: #ef4444;
            font-weight: 600;
        }}
    </style>
</head>
<body>
    <header>
        <span class="version">v{version}</span>
        <h1>CRAI Comment Review</h1>
        <div class="subtitle">Submit a comment about a movie or book, or browse the analysis history below.</div>
    </header>
    <div class="container">
        <div class="submit-panel">
            <textarea id="comment" placeholder="e.g., 'The Shawshank Redemption was a masterpiece, one of the best films ever.'"></textarea>
            <button id="submit">Submit for Analysis</button>
            <div id="status"></div>
        </div>
        <div class="cards" id="cards"><p>Loading&hellip;</p></div>
    </div>
    <script>
        function esc(text) {{
            var div = document.createElement('div');
            div.textContent = text == null ? 'N/A' : String(text);
            return div.innerHTML;
        }}

        function card(item) {{
            var analysis = item.analysis || {{}};
            var info = item.retrieved_info;
            var approved = !!analysis.publish;
            var poster = info && info.poster_url
                ? '<img src="' + esc(info.poster_url) + '" alt="poster">'
                : '<div class="no-poster">No Image</div>';
            var year = info ? info.year : 'N/A';
            return '<div class="card ' + (approved ? '' : 'rejected') + '">' + poster +
                '<div>' +
                '<p><strong>Comment:</strong> &quot;' + esc(item.original_comment) + '&quot;</p>' +
                '<p><strong>Subject:</strong> ' + esc(analysis.subject_title) + ' (' + esc(year) + ')</p>' +
                '<p><strong>Sentiment:</strong> ' + esc(analysis.sentiment) +
                ' | <strong>Profane:</strong> ' + esc(analysis.is_profane) +
                ' | <strong>Relevant:</strong> ' + esc(analysis.is_relevant) + '</p>' +
                '<p><span class="' + (approved ? 'verdict-approved' : 'verdict-rejected') + '">' +
                (approved ? 'Approved' : 'Rejected') + '</span></p>' +
                '</div></div>';
        }}

        async function loadComments() {{
            var cards = document.getElementById('cards');
            try {{
                var response = await fetch('/comments');
                var data = await response.json();
                var comments = data.comments || [];
                if (comments.length === 0) {{
                    cards.innerHTML = '<p>No comments analyzed yet.</p>';
                    return;
                }}
                // Newest first
                cards.innerHTML = comments.slice().reverse().map(card).join('');
            }} catch (e) {{
                cards.innerHTML = '<p>Error fetching comments: ' + esc(e.message) + '</p>';
            }}
        }}

        async function submitComment() {{
            var button = document.getElementById('submit');
            var status = document.getElementById('status');
            var comment = document.getElementById('comment').value;
            button.disabled = true;
            status.className = '';
            status.textContent = 'Analyzing…';
            try {{
                var response = await fetch('/analyze-comment', {{
                    method: 'POST',
                    headers: {{ 'Content-Type': 'application/json' }},
                    body: JSON.stringify({{ comment: comment }})
                }});
                if (response.ok) {{
                    status.textContent = 'Analysis complete.';
                    document.getElementById('comment').value = '';
                }} else {{
                    var body = await response.json();
                    status.className = 'error';
                    status.textContent = (body.error && body.error.message) || 'Analysis failed.';
                }}
            }} catch (e) {{
                status.className = 'error';
                status.textContent = 'Error connecting to API: ' + e.message;
            }}
            button.disabled = false;
            loadComments();
        }}

        document.getElementById('submit').addEventListener('click', submitComment);
        loadComments();
    </script>
</body>
</html>
"#
    );

    Html(html)
}

/// Build UI routes
pub fn ui_routes() -> Router<AppState> {
    Router::new().route("/ui", get(review_page))
}
