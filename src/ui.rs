use crate::models::Item;

pub fn render_list(title: &str, items: &[Item]) -> String {
    let title = escape_html(title);
    let rows = if items.is_empty() {
        EMPTY_HTML.to_string()
    } else {
        items
            .iter()
            .map(|item| render_item(&title, item))
            .collect::<Vec<_>>()
            .join("\n")
    };

    LIST_HTML
        .replace("{{TITLE}}", &title)
        .replace("{{ITEMS}}", &rows)
}

fn render_item(title: &str, item: &Item) -> String {
    ITEM_HTML
        .replace("{{ID}}", &item.id.to_string())
        .replace("{{CHECKED}}", if item.is_checked { "checked " } else { "" })
        .replace("{{CLASS}}", if item.is_checked { "item done" } else { "item" })
        .replace("{{LIST}}", title)
        .replace("{{NAME}}", &escape_html(&item.name))
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

const ITEM_HTML: &str = r#"      <li class="{{CLASS}}">
        <form class="check" method="post" action="/check">
          <input type="hidden" name="listName" value="{{LIST}}" />
          <input type="hidden" name="checkbox" value="{{ID}}" />
          <input type="checkbox" {{CHECKED}}onchange="this.form.submit()" />
          <span class="name">{{NAME}}</span>
        </form>
        <form class="remove" method="post" action="/delete">
          <input type="hidden" name="listName" value="{{LIST}}" />
          <button class="btn-delete" type="submit" name="delete" value="{{ID}}" aria-label="Delete">&times;</button>
        </form>
      </li>"#;

const EMPTY_HTML: &str = r#"      <li class="empty">Nothing here yet. Add the first task below.</li>"#;

const LIST_HTML: &str = r#"<!DOCTYPE html>
<html lang="es">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{TITLE}} · To-Do List</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f8f3e6;
      --bg-2: #f5d3a7;
      --ink: #2b2a28;
      --muted: #8b857d;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(560px, 100%);
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
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.8rem);
      margin: 0;
    }

    ul {
      list-style: none;
      margin: 0;
      padding: 0;
      display: grid;
      gap: 10px;
    }

    .item {
      background: white;
      border-radius: 18px;
      padding: 12px 16px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: flex;
      align-items: center;
      justify-content: space-between;
      gap: 12px;
    }

    .item form.check {
      display: flex;
      align-items: center;
      gap: 12px;
      margin: 0;
    }

    .item input[type="checkbox"] {
      width: 20px;
      height: 20px;
      accent-color: var(--accent);
    }

    .item.done .name {
      text-decoration: line-through;
      color: var(--muted);
    }

    .empty {
      color: var(--muted);
      text-align: center;
      padding: 12px;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      font-weight: 600;
      cursor: pointer;
    }

    .btn-delete {
      background: transparent;
      color: var(--muted);
      font-size: 1.4rem;
      line-height: 1;
      padding: 4px 10px;
    }

    .btn-delete:hover {
      color: var(--accent);
    }

    .add {
      display: flex;
      gap: 10px;
    }

    .add input {
      flex: 1;
      border: 1px solid rgba(47, 72, 88, 0.16);
      border-radius: 999px;
      padding: 14px 18px;
      font: inherit;
    }

    .btn-add {
      background: var(--accent);
      color: white;
      padding: 14px 22px;
      font-size: 1.1rem;
      box-shadow: 0 10px 24px rgba(255, 107, 74, 0.3);
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>{{TITLE}}</h1>
    </header>

    <ul>
{{ITEMS}}
    </ul>

    <form class="add" method="post" action="/">
      <input type="text" name="taskInput" placeholder="New task" autocomplete="off" required />
      <button class="btn-add" type="submit" name="list" value="{{TITLE}}">+</button>
    </form>
  </main>
</body>
</html>
"#;
