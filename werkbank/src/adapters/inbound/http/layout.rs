use crate::domain::entity::EntityKind;

const STYLES: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; background: #f5f6f8; color: #1f2328; }
.top-nav { display: flex; gap: 1rem; padding: 0.75rem 1.5rem; background: #1f2328; }
.nav-link { color: #d0d7de; text-decoration: none; }
.nav-link.active { color: #fff; font-weight: 600; }
.container { max-width: 960px; margin: 2rem auto; padding: 0 1rem; }
.header { display: flex; justify-content: space-between; align-items: center; }
.btn { display: inline-block; padding: 0.4rem 0.8rem; border: 0; border-radius: 4px; background: #0969da; color: #fff; text-decoration: none; cursor: pointer; }
.btn-secondary { background: #6e7781; }
.btn-danger { background: #cf222e; }
.flash { padding: 0.75rem; margin: 1rem 0; background: #dafbe1; border-radius: 4px; }
.errors { padding: 0.75rem; margin: 1rem 0; background: #ffebe9; border-radius: 4px; }
.empty, .muted { color: #6e7781; }
.table { width: 100%; border-collapse: collapse; background: #fff; }
.table th, .table td { padding: 0.5rem; border-bottom: 1px solid #d0d7de; text-align: left; }
.card { display: grid; gap: 1rem; padding: 1.5rem; background: #fff; border-radius: 4px; }
.card label { display: grid; gap: 0.25rem; }
.actions { display: flex; gap: 0.5rem; }
.inline { display: inline; }
.badge { padding: 0.1rem 0.5rem; border-radius: 999px; background: #eaeef2; }
"#;

fn nav_link(kind: EntityKind, active: EntityKind, label: &str) -> String {
    let class = if kind == active {
        "nav-link active"
    } else {
        "nav-link"
    };

    format!(
        r#"<a class="{class}" href="{href}">{label}</a>"#,
        href = kind.list_path()
    )
}

/// Wraps page content into the document shell with the entity navigation.
pub(super) fn layout(active: EntityKind, content: &str) -> String {
    format!(
        r#"<!doctype html>
<html lang="de">
  <head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Werkbank</title>
    <style>{STYLES}</style>
  </head>
  <body>
    <nav class="top-nav">
      {tasks}
      {projects}
    </nav>
    <main class="container">
{content}
    </main>
  </body>
</html>
"#,
        tasks = nav_link(EntityKind::Tasks, active, "Tasks"),
        projects = nav_link(EntityKind::Projects, active, "Projects"),
    )
}
