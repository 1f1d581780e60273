pub fn render_index(total: usize) -> String {
    INDEX_HTML.replace("{{TOTAL}}", &total.to_string())
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Drink Log</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f6efe6;
      --bg-2: #e8d5bf;
      --ink: #2f2620;
      --accent: #8b7355;
      --accent-2: #6b5444;
      --card: rgba(255, 255, 255, 0.88);
      --shadow: 0 24px 60px rgba(107, 84, 68, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #f3e4d2 60%, #faf4ec 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: start center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(860px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 24px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-size: clamp(2rem, 4vw, 2.6rem);
      margin: 0;
    }

    h2, h3 {
      margin: 0;
    }

    .subtitle {
      margin: 4px 0 0;
      color: #7a6d62;
    }

    .tabs {
      display: flex;
      gap: 6px;
      padding: 6px;
      background: rgba(107, 84, 68, 0.08);
      border-radius: 999px;
      width: fit-content;
    }

    .tab {
      border: none;
      border-radius: 999px;
      padding: 8px 16px;
      font: inherit;
      font-weight: 600;
      color: #7a6d62;
      background: transparent;
      cursor: pointer;
    }

    .tab.active {
      background: white;
      color: var(--accent-2);
      box-shadow: 0 8px 16px rgba(107, 84, 68, 0.12);
    }

    .tab-content {
      display: none;
      gap: 18px;
    }

    .tab-content.active {
      display: grid;
    }

    form {
      display: grid;
      gap: 12px;
    }

    label {
      display: grid;
      gap: 6px;
      font-weight: 500;
    }

    input, select {
      font: inherit;
      padding: 12px 14px;
      border-radius: 14px;
      border: 1px solid rgba(107, 84, 68, 0.2);
      background: white;
    }

    .field {
      display: none;
    }

    .submit {
      display: none;
      border: none;
      border-radius: 999px;
      padding: 14px 20px;
      font: inherit;
      font-weight: 600;
      color: white;
      background: var(--accent);
      cursor: pointer;
    }

    .month-title {
      margin-top: 8px;
      color: var(--accent-2);
    }

    .drink-item, .stat, .month-card, .place-item {
      background: white;
      border-radius: 18px;
      padding: 14px 18px;
      border: 1px solid rgba(107, 84, 68, 0.08);
    }

    .drink-item {
      display: flex;
      justify-content: space-between;
      gap: 12px;
    }

    .drink-type {
      font-weight: 600;
    }

    .drink-details, .drink-time {
      color: #8b7f74;
      font-size: 0.9rem;
    }

    .delete-btn {
      border: none;
      background: transparent;
      cursor: pointer;
      font-size: 1.1rem;
    }

    .grid {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(140px, 1fr));
      gap: 12px;
    }

    .stat .label {
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.1em;
      color: #8b7f74;
    }

    .stat .value {
      display: block;
      font-size: 1.6rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .bar-row {
      display: grid;
      grid-template-columns: 110px 1fr 90px;
      gap: 10px;
      align-items: center;
      font-size: 0.9rem;
    }

    .bar {
      height: 14px;
      border-radius: 999px;
      background: var(--accent);
    }

    .place-item {
      display: flex;
      gap: 12px;
      align-items: center;
    }

    .place-name {
      flex: 1;
      font-weight: 600;
    }

    .month-details {
      display: flex;
      flex-wrap: wrap;
      gap: 12px;
      margin-top: 6px;
      font-size: 0.9rem;
    }

    .empty-state, .status {
      color: #8b7f74;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Drink Log</h1>
      <p class="subtitle"><span id="total">{{TOTAL}}</span> drinks logged so far.</p>
    </header>

    <nav class="tabs" role="tablist">
      <button class="tab active" type="button" data-tab="log">Log</button>
      <button class="tab" type="button" data-tab="history">History</button>
      <button class="tab" type="button" data-tab="stats">Stats</button>
    </nav>

    <section class="tab-content active" id="log-tab">
      <form id="drink-form" method="post" action="/drinks">
        <label>Drink type
          <select id="drink-type" name="type" required>
            <option value="">Choose a drink</option>
            <option value="boba">🧋 Boba</option>
            <option value="coffee">☕ Coffee</option>
            <option value="matcha">🍵 Matcha</option>
            <option value="tea">🫖 Tea</option>
            <option value="energy-drink">⚡️ Energy Drink</option>
            <option value="other">🍹 Other</option>
          </select>
        </label>
        <label class="field venue">Place
          <input id="drink-place" name="place" list="places-list" autocomplete="off" />
        </label>
        <label class="field venue">Drink
          <input id="drink-item" name="item" list="items-list" autocomplete="off" />
        </label>
        <label class="field brand">Brand
          <input id="drink-brand" name="brand" list="brands-list" autocomplete="off" />
        </label>
        <label class="field brand">Flavor
          <input id="drink-flavor" name="flavor" list="flavors-list" autocomplete="off" />
        </label>
        <button class="submit" id="submit-btn" type="submit">Log drink</button>
      </form>
      <datalist id="places-list"></datalist>
      <datalist id="items-list"></datalist>
      <datalist id="brands-list"></datalist>
      <datalist id="flavors-list"></datalist>
    </section>

    <section class="tab-content" id="history-tab">
      <div id="drinks-list"></div>
    </section>

    <section class="tab-content" id="stats-tab">
      <label>Year
        <select id="year-select"></select>
      </label>
      <div class="grid" id="type-cards"></div>
      <div class="stat" id="most-visited-card" hidden>
        <span class="label">Most visited</span>
        <span class="value" id="most-visited-label"></span>
        <span id="most-visited-count"></span>
      </div>
      <h3>By type</h3>
      <div id="type-chart"></div>
      <h3>Top places</h3>
      <div id="top-places-list"></div>
      <h3>Boba per month</h3>
      <div id="monthly-chart"></div>
      <h3>Monthly breakdown</h3>
      <div id="monthly-breakdown"></div>
    </section>

    <div class="status" id="status"></div>
  </main>

  <script>
    const statusEl = document.getElementById('status');
    const typeSelect = document.getElementById('drink-type');
    const yearSelect = document.getElementById('year-select');
    const form = document.getElementById('drink-form');
    const tabs = Array.from(document.querySelectorAll('.tab'));

    const esc = (value) => String(value ?? '')
      .replace(/&/g, '&amp;')
      .replace(/</g, '&lt;')
      .replace(/>/g, '&gt;')
      .replace(/"/g, '&quot;');

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const getJson = async (url) => {
      const res = await fetch(url);
      if (!res.ok) {
        throw new Error((await res.text()) || `Request failed: ${url}`);
      }
      return res.json();
    };

    const setActiveTab = (name) => {
      tabs.forEach((tab) => tab.classList.toggle('active', tab.dataset.tab === name));
      document.querySelectorAll('.tab-content').forEach((section) => {
        section.classList.toggle('active', section.id === `${name}-tab`);
      });
      if (name === 'stats') {
        loadStats().catch((err) => setStatus(err.message, 'error'));
      }
    };

    const showFields = () => {
      const type = typeSelect.value;
      const energy = type === 'energy-drink';
      document.querySelectorAll('.field.venue').forEach((el) => {
        el.style.display = type && !energy ? 'grid' : 'none';
        el.querySelector('input').required = Boolean(type && !energy);
      });
      document.querySelectorAll('.field.brand').forEach((el) => {
        el.style.display = energy ? 'grid' : 'none';
        el.querySelector('input').required = energy;
      });
      document.getElementById('submit-btn').style.display = type ? 'block' : 'none';
    };

    const formatWhen = (timestamp) => {
      const date = new Date(timestamp);
      const sameYear = date.getFullYear() === new Date().getFullYear();
      const day = date.toLocaleDateString('en-US', {
        month: 'short',
        day: 'numeric',
        year: sameYear ? undefined : 'numeric'
      });
      const time = date.toLocaleTimeString('en-US', { hour: 'numeric', minute: '2-digit', hour12: true });
      return { day, time };
    };

    const loadHistory = async () => {
      const history = await getJson('/api/drinks');
      document.getElementById('total').textContent = history.total;
      const list = document.getElementById('drinks-list');
      if (!history.months.length) {
        list.innerHTML = '<p class="empty-state">No drinks logged yet. Add your first drink!</p>';
        return;
      }
      list.innerHTML = history.months.map((month) => `
        <h3 class="month-title">${esc(month.label)}</h3>
        ${month.drinks.map((drink) => {
          const when = formatWhen(drink.timestamp);
          return `
            <div class="drink-item">
              <div>
                <div class="drink-type">${drink.emoji} ${esc(drink.type_label)}</div>
                ${drink.headline ? `<div><strong>${esc(drink.headline)}</strong></div>` : ''}
                ${drink.detail ? `<div>${esc(drink.detail)}</div>` : ''}
                <div class="drink-details">${esc(when.day)}</div>
              </div>
              <div>
                <div class="drink-time">${esc(when.time)}</div>
                <button class="delete-btn" data-id="${drink.id}" aria-label="Delete drink">🗑️</button>
              </div>
            </div>`;
        }).join('')}
      `).join('');
    };

    const fillList = (id, values) => {
      document.getElementById(id).innerHTML = values.map((value) => `<option value="${esc(value)}">`).join('');
    };

    const loadSuggestions = async () => {
      const suggestions = await getJson('/api/suggestions');
      fillList('places-list', suggestions.places);
      fillList('items-list', suggestions.items);
      fillList('brands-list', suggestions.brands);
      fillList('flavors-list', suggestions.flavors);
    };

    const loadYears = async () => {
      const data = await getJson('/api/years');
      const previous = yearSelect.dataset.ready ? yearSelect.value : null;
      yearSelect.innerHTML = '<option value="">All Years</option>' +
        data.years.map((year) => `<option value="${year}">${year}</option>`).join('');
      const keep = previous !== null && (previous === '' || data.years.includes(Number(previous)));
      yearSelect.value = keep ? previous : (data.default_year ?? '');
      yearSelect.dataset.ready = '1';
    };

    const bars = (rows, unit) => {
      const max = Math.max(1, ...rows.map((row) => row.count));
      return rows.map((row) => `
        <div class="bar-row">
          <span>${esc(row.label)}</span>
          <div class="bar" style="width: ${(row.count / max) * 100}%"></div>
          <span>${row.count} ${unit}${row.percent != null ? ` (${row.percent}%)` : ''}</span>
        </div>`).join('');
    };

    const loadStats = async () => {
      const stats = await getJson(`/api/stats?year=${encodeURIComponent(yearSelect.value)}`);

      document.getElementById('type-cards').innerHTML = stats.type_cards.map((card) => `
        <div class="stat"><span class="label">${esc(card.label)}</span><span class="value">${card.count}</span></div>
      `).join('');

      const mostCard = document.getElementById('most-visited-card');
      mostCard.hidden = !stats.most_visited;
      if (stats.most_visited) {
        document.getElementById('most-visited-label').textContent = stats.most_visited.place;
        document.getElementById('most-visited-count').textContent = `${stats.most_visited.count} visits`;
      }

      document.getElementById('type-chart').innerHTML = stats.by_type.length
        ? bars(stats.by_type, '')
        : '<p class="empty-state">No drinks for this period.</p>';

      const medals = ['🥇', '🥈', '🥉'];
      document.getElementById('top-places-list').innerHTML = stats.top_places.length
        ? stats.top_places.map((item, index) => `
          <div class="place-item">
            <span>${medals[index] || '📍'}</span>
            <span class="place-name">${esc(item.place)}</span>
            <span>${item.count} ${item.count === 1 ? 'visit' : 'visits'}</span>
          </div>`).join('')
        : '<p class="empty-state">No places yet.</p>';

      document.getElementById('monthly-chart').innerHTML = stats.boba_monthly.length
        ? bars(stats.boba_monthly, 'drinks')
        : '<p class="empty-state">No boba for this period.</p>';

      document.getElementById('monthly-breakdown').innerHTML = stats.monthly_breakdown.length
        ? stats.monthly_breakdown.map((month) => `
          <div class="month-card">
            <strong>${esc(month.label)}</strong>
            <div class="month-details">
              <span><strong>Total:</strong> ${month.count}</span>
              ${month.types.map((type) => `<span><strong>${esc(type.label)}:</strong> ${type.count}</span>`).join('')}
            </div>
          </div>`).join('')
        : '<p class="empty-state">No monthly data available yet.</p>';
    };

    const refresh = async () => {
      await Promise.all([loadHistory(), loadSuggestions(), loadYears()]);
      await loadStats();
    };

    form.addEventListener('submit', async (event) => {
      event.preventDefault();
      const data = Object.fromEntries(new FormData(form).entries());
      try {
        const res = await fetch('/api/drinks', {
          method: 'POST',
          headers: { 'content-type': 'application/json' },
          body: JSON.stringify(data)
        });
        if (!res.ok) {
          throw new Error((await res.text()) || 'Could not save drink');
        }
        form.reset();
        showFields();
        await refresh();
        setStatus('', '');
        setActiveTab('history');
      } catch (err) {
        setStatus(err.message, 'error');
      }
    });

    document.getElementById('drinks-list').addEventListener('click', async (event) => {
      const button = event.target.closest('.delete-btn');
      if (!button || !confirm('Are you sure you want to delete this drink?')) {
        return;
      }
      try {
        const res = await fetch(`/api/drinks/${button.dataset.id}`, { method: 'DELETE' });
        if (!res.ok) {
          throw new Error((await res.text()) || 'Could not delete drink');
        }
        await refresh();
      } catch (err) {
        setStatus(err.message, 'error');
      }
    });

    tabs.forEach((tab) => tab.addEventListener('click', () => setActiveTab(tab.dataset.tab)));
    typeSelect.addEventListener('change', showFields);
    yearSelect.addEventListener('change', () => loadStats().catch((err) => setStatus(err.message, 'error')));

    showFields();
    refresh().catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;
