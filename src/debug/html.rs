//! HTML page for the debug dashboard.

/// Single-file dashboard: loads `/logs`, follows `/ws`, and offers the same
/// controls as the terminal panel.
pub const DASHBOARD_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>toolcat network debug</title>
    <style>
        * { box-sizing: border-box; margin: 0; padding: 0; }

        body {
            font-family: ui-monospace, SFMono-Regular, Menlo, monospace;
            font-size: 12px;
            background: #111;
            color: #eee;
        }

        header {
            display: flex;
            align-items: center;
            gap: 12px;
            padding: 8px 12px;
            background: #1d1d1d;
            border-bottom: 1px solid #333;
            position: sticky;
            top: 0;
        }

        header h1 { font-size: 13px; font-weight: 600; flex: 1; }

        button {
            background: #2a2a2a;
            color: #eee;
            border: 1px solid #444;
            border-radius: 3px;
            padding: 3px 8px;
            font: inherit;
            cursor: pointer;
        }

        button:hover { background: #363636; }

        label { display: flex; align-items: center; gap: 4px; }

        .status { font-size: 11px; color: #888; }
        .status.connected { color: #6c6; }

        #logs { padding: 4px 0; }

        .entry { padding: 6px 12px; border-bottom: 1px solid #222; }

        .line { display: flex; gap: 8px; align-items: baseline; }

        .method {
            padding: 0 4px;
            border-radius: 2px;
            font-weight: 600;
            background: #264d26;
            color: #9f9;
        }

        .entry.failed .method { background: #5a1f1f; color: #f99; }

        .url { flex: 1; word-break: break-all; }
        .outcome { color: #ccc; }
        .entry.failed .outcome { color: #f77; }
        .meta { color: #888; }

        pre {
            margin-top: 4px;
            padding: 4px 6px;
            background: #1a1a1a;
            color: #bbb;
            white-space: pre-wrap;
            word-break: break-all;
        }

        .empty { padding: 24px 12px; color: #777; }
    </style>
</head>
<body>
    <header>
        <h1>Network Debug</h1>
        <label><input type="checkbox" id="errors-only"> errors only</label>
        <button id="clear">Clear</button>
        <button id="download">Download</button>
        <button id="persist">Persist: ?</button>
        <span class="status" id="status">disconnected</span>
    </header>
    <div id="logs"></div>

    <script>
        let entries = [];
        let errorsOnly = false;

        const logsEl = document.getElementById('logs');
        const statusEl = document.getElementById('status');
        const persistEl = document.getElementById('persist');

        function isFailure(e) {
            return e.ok !== true || !!e.error;
        }

        function escapeHtml(text) {
            const div = document.createElement('div');
            div.textContent = text;
            return div.innerHTML;
        }

        function render() {
            const shown = entries.slice().reverse().filter(e => !errorsOnly || isFailure(e));
            if (shown.length === 0) {
                logsEl.innerHTML = '<div class="empty">No logs yet.</div>';
                return;
            }
            logsEl.innerHTML = shown.map(e => {
                const outcome = e.status !== undefined ? '→ ' + e.status : '→ FAILED';
                const started = new Date(e.startedAt).toLocaleTimeString();
                let details = '';
                if (e.responseSnippet) {
                    details += '<pre>' + escapeHtml(e.responseSnippet) + '</pre>';
                }
                if (e.error) {
                    details += '<pre>' + escapeHtml(e.error.name + ': ' + e.error.message) + '</pre>';
                }
                return '<div class="entry' + (isFailure(e) ? ' failed' : '') + '">' +
                    '<div class="line">' +
                    '<span class="method">' + escapeHtml(e.method) + '</span>' +
                    '<span class="url">' + escapeHtml(e.url) + '</span>' +
                    '<span class="outcome">' + outcome + '</span>' +
                    '<span class="meta">' + e.durationMs + 'ms</span>' +
                    '<span class="meta">' + started + '</span>' +
                    '</div>' + details + '</div>';
            }).join('');
        }

        async function reload() {
            const res = await fetch('/logs');
            entries = await res.json();
            render();
        }

        async function refreshFlag() {
            const res = await fetch('/debug');
            const flag = await res.json();
            persistEl.textContent = 'Persist: ' + (flag.enabled ? 'on' : 'off');
        }

        function connect() {
            const ws = new WebSocket('ws://' + location.host + '/ws');
            ws.onopen = () => {
                statusEl.textContent = 'connected';
                statusEl.className = 'status connected';
                reload();
            };
            ws.onmessage = (msg) => {
                const event = JSON.parse(msg.data);
                if (event.type === 'recorded') {
                    entries.push(event.entry);
                    render();
                } else if (event.type === 'cleared') {
                    entries = [];
                    render();
                } else if (event.type === 'lagged') {
                    reload();
                }
            };
            ws.onclose = () => {
                statusEl.textContent = 'disconnected';
                statusEl.className = 'status';
                setTimeout(connect, 2000);
            };
        }

        document.getElementById('errors-only').addEventListener('change', (e) => {
            errorsOnly = e.target.checked;
            render();
        });

        document.getElementById('clear').addEventListener('click', async () => {
            await fetch('/logs', { method: 'DELETE' });
            entries = [];
            render();
        });

        document.getElementById('download').addEventListener('click', () => {
            window.location = '/logs/export';
        });

        persistEl.addEventListener('click', async () => {
            await fetch('/debug/toggle', { method: 'POST' });
            refreshFlag();
        });

        render();
        refreshFlag();
        connect();
    </script>
</body>
</html>
"#;
