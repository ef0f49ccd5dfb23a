//! The single-page form: input, counter, analyze button, loading and error
//! indicators, and the results region the API's HTML fragment is placed into.

pub fn render(max_input_chars: usize) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>EcoScan</title>
    <style>
        *, *::before, *::after {{ margin: 0; padding: 0; box-sizing: border-box; }}
        :root {{
            --bg: #0b1410;
            --card: #13211b;
            --text: #e6f2ec;
            --muted: #8aa89a;
            --green: #3ddc84;
            --yellow: #f5c542;
            --red: #ff5c5c;
            --cyan: #3cc8e0;
        }}
        body {{ background: var(--bg); color: var(--text); font-family: system-ui, sans-serif; padding: 2rem; }}
        main {{ max-width: 720px; margin: 0 auto; }}
        h1 {{ font-size: 1.6rem; margin-bottom: 1rem; }}
        textarea {{ width: 100%; min-height: 140px; background: var(--card); color: var(--text); border: 1px solid #24382f; border-radius: 8px; padding: .75rem; font: inherit; }}
        .controls {{ display: flex; justify-content: space-between; align-items: center; margin-top: .5rem; }}
        #charCount {{ color: var(--muted); font-size: .85rem; }}
        button {{ background: var(--green); color: #04210f; border: 0; border-radius: 6px; padding: .6rem 1.2rem; font-weight: 600; cursor: pointer; }}
        button:disabled {{ opacity: .5; cursor: wait; }}
        .loading, .error {{ display: none; margin-top: 1rem; }}
        .loading.active, .error.active {{ display: block; }}
        .error {{ color: var(--red); }}
        #results {{ display: none; margin-top: 1.5rem; }}
        #results.visible {{ display: block; }}
        .score-card {{ background: var(--card); border-radius: 10px; padding: 1rem; }}
        .score-num {{ font-size: 2.4rem; font-weight: 700; color: var(--green); }}
        .score-num.yellow {{ color: var(--yellow); }}
        .score-num.red {{ color: var(--red); }}
        .bar-track {{ position: relative; height: 10px; background: #24382f; border-radius: 5px; margin-top: .75rem; }}
        .bar-fill {{ height: 100%; border-radius: 5px; background: var(--green); }}
        .bar-fill.yellow {{ background: var(--yellow); }}
        .bar-fill.red {{ background: var(--red); }}
        .bar-label {{ position: absolute; right: 0; top: 12px; font-size: .75rem; color: var(--muted); }}
        .verdict-good {{ color: var(--green); }}
        .verdict-okay {{ color: var(--yellow); }}
        .verdict-bad {{ color: var(--red); }}
        .tags {{ margin: 1rem 0; }}
        .tag {{ display: inline-block; border-radius: 999px; padding: .2rem .7rem; margin: 0 .4rem .4rem 0; font-size: .8rem; }}
        .tag-positive {{ background: rgba(61,220,132,.15); color: var(--green); }}
        .tag-negative {{ background: rgba(255,92,92,.15); color: var(--red); }}
        .section {{ margin-top: 1rem; }}
        .section-title {{ font-weight: 600; margin-bottom: .4rem; }}
        .item-row {{ display: flex; align-items: baseline; gap: .5rem; margin-bottom: .3rem; }}
        .item-dot {{ width: 8px; height: 8px; border-radius: 50%; flex-shrink: 0; }}
        .dot-green {{ background: var(--green); }}
        .dot-yellow {{ background: var(--yellow); }}
        .dot-cyan {{ background: var(--cyan); }}
    </style>
</head>
<body>
<main>
    <h1>EcoScan</h1>
    <textarea id="userInput" maxlength="{max_input_chars}" placeholder="Describe a product..."></textarea>
    <div class="controls">
        <span id="charCount">0 chars</span>
        <input type="file" id="fileInput" accept=".txt,.pdf">
        <button id="analyzeBtn">Analyze</button>
    </div>
    <div id="loadingState" class="loading">Analyzing...</div>
    <div id="errorState" class="error" role="alert"></div>
    <section id="results"></section>
</main>
<script>
const userInput = document.getElementById('userInput');
const analyzeBtn = document.getElementById('analyzeBtn');
const charCount = document.getElementById('charCount');
const loadingState = document.getElementById('loadingState');
const errorState = document.getElementById('errorState');
const resultsEl = document.getElementById('results');

const fileInput = document.getElementById('fileInput');
const sessionId = crypto.randomUUID();

userInput.addEventListener('input', () => {{
    charCount.textContent = `${{userInput.value.length}} chars`;
}});
analyzeBtn.addEventListener('click', analyze);
fileInput.addEventListener('change', analyzeFile);

function analyze() {{
    const text = userInput.value.trim();
    if (!text) {{ userInput.focus(); return; }}
    run(() => fetch('/api/v1/analyze', {{
        method: 'POST',
        headers: {{ 'Content-Type': 'application/json' }},
        body: JSON.stringify({{ text, session_id: sessionId }})
    }}));
}}

function analyzeFile() {{
    const file = fileInput.files[0];
    if (!file) return;
    const form = new FormData();
    form.append('session_id', sessionId);
    form.append('file', file);
    fileInput.value = '';
    run(() => fetch('/api/v1/analyze/upload', {{ method: 'POST', body: form }}));
}}

async function run(send) {{
    if (analyzeBtn.disabled) return;
    analyzeBtn.disabled = true;
    fileInput.disabled = true;
    loadingState.classList.add('active');
    errorState.classList.remove('active');
    resultsEl.classList.remove('visible');
    resultsEl.innerHTML = '';

    try {{
        const response = await send();
        const data = await response.json();
        if (!response.ok) throw new Error(data.error && data.error.message);
        show(data);
    }} catch (err) {{
        errorState.textContent = `⚠️ ${{err.message || 'Analysis failed. Please try again.'}}`;
        errorState.classList.add('active');
    }} finally {{
        analyzeBtn.disabled = false;
        fileInput.disabled = false;
        loadingState.classList.remove('active');
    }}
}}

function show(data) {{
    resultsEl.innerHTML = data.html;
    const scoreNum = document.getElementById('scoreNum');
    const bar = document.getElementById('scoreBar');
    const barLabel = document.getElementById('barLabel');
    const frames = data.view.animation.frames;
    let i = 0;
    const timer = setInterval(() => {{
        const frame = frames[i++];
        scoreNum.textContent = frame.label;
        bar.style.width = frame.bar_width + '%';
        barLabel.textContent = frame.label + '%';
        if (i >= frames.length) clearInterval(timer);
    }}, data.view.animation.interval_ms);

    resultsEl.classList.add('visible');
    resultsEl.scrollIntoView({{ behavior: 'smooth', block: 'start' }});
}}
</script>
</body>
</html>"#
    )
}
