use crate::group::Tree;

/// Render a self-contained HTML report (tree embedded as JSON).
///
/// The template is filled with `replace` rather than `format!()` so the braces
/// in the inline CSS/JS need no escaping.
pub fn render_html_report(tree: &Tree) -> anyhow::Result<String> {
    // "</" inside a string literal would end the <script> element early.
    let json = serde_json::to_string(tree)?.replace("</", "<\\/");

    const TEMPLATE: &str = r#"<!doctype html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Student Roster</title>
<style>
  body { font-family: system-ui, -apple-system, Segoe UI, Roboto, Arial, sans-serif; margin: 0; }
  header { padding: 12px 16px; border-bottom: 1px solid #ddd; }
  main { padding: 12px 16px; }
  .summary { display: flex; gap: 16px; flex-wrap: wrap; font-size: 14px; color: #333; }
  .pill { padding: 4px 8px; border: 1px solid #ddd; border-radius: 999px; background: #fafafa; }
  details { margin-left: 16px; }
  summary { cursor: pointer; padding: 2px 4px; }
  .count { color: #777; font-size: 12px; }
  ol { margin: 4px 0 8px 32px; }
  .hidden { display: none; }
</style>
</head>
<body>
<header>
  <div class="summary" id="summary"></div>
  <input id="search" placeholder="Search name..." style="margin-top: 8px; padding: 6px 8px; border: 1px solid #ddd; border-radius: 6px;">
</header>
<main id="tree"></main>

<script>
// Embedded roster tree (JSON object literal)
const DATA = __DATA__;

function el(tag, text, cls) {
  const e = document.createElement(tag);
  if (text !== undefined) e.textContent = text;
  if (cls) e.className = cls;
  return e;
}

function node(label, count, open) {
  const d = el("details");
  d.open = open;
  const s = el("summary", label + " ");
  s.appendChild(el("span", "(" + count + ")", "count"));
  d.appendChild(s);
  return d;
}

function renderSummary() {
  const box = document.getElementById("summary");
  box.appendChild(el("span", "Total students: " + DATA.count, "pill"));
  for (const s of DATA.schools) box.appendChild(el("span", s.school + ": " + s.count, "pill"));
}

function renderTree() {
  const root = document.getElementById("tree");
  for (const s of DATA.schools) {
    const sd = node(s.school, s.count, true);
    for (const t of s.tracks) {
      const td = node("Track " + t.track, t.count, false);
      for (const g of t.grades) {
        const gd = node("Grade " + g.grade, g.count, false);
        const ol = el("ol");
        for (const r of g.records) {
          const li = el("li", r.name);
          li.dataset.name = r.name.toLowerCase();
          ol.appendChild(li);
        }
        gd.appendChild(ol);
        td.appendChild(gd);
      }
      sd.appendChild(td);
    }
    root.appendChild(sd);
  }
}

document.getElementById("search").addEventListener("input", (e) => {
  const q = (e.target.value || "").toLowerCase();
  for (const li of document.querySelectorAll("li[data-name]")) {
    const hit = !q || li.dataset.name.includes(q);
    li.classList.toggle("hidden", !hit);
    if (hit && q) {
      for (let p = li.parentElement; p; p = p.parentElement) {
        if (p.tagName === "DETAILS") p.open = true;
      }
    }
  }
});

renderSummary();
renderTree();
</script>
</body>
</html>
"#;

    Ok(TEMPLATE.replace("__DATA__", &json))
}
