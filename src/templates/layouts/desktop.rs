use maud::{html, Markup, DOCTYPE};

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; background: #0e1117; color: #e6e6e6; }
header { display: flex; align-items: center; gap: 12px; padding: 12px 24px; background: #161a23; }
main { display: grid; grid-template-columns: 260px 1fr; gap: 24px; padding: 24px; }
aside fieldset { border: 1px solid #2b3040; border-radius: 8px; margin-bottom: 16px; }
.metrics { display: grid; grid-template-columns: repeat(4, 1fr); gap: 16px; }
.card { background: #1e2130; padding: 15px; border-radius: 10px; }
.card h2, .card h3 { margin-top: 0; }
.charts { display: grid; grid-template-columns: 1fr 1fr; gap: 16px; margin-top: 16px; }
.bar-row { display: grid; grid-template-columns: 140px 1fr 48px; gap: 8px; align-items: center; font-size: 0.85em; }
.bar { background: #00d1b2; height: 12px; border-radius: 3px; }
table { width: 100%; border-collapse: collapse; font-size: 0.85em; }
th, td { text-align: left; padding: 4px 8px; border-bottom: 1px solid #2b3040; }
a { color: #7aa2ff; }
"#;

pub fn desktop_layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="ko" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (maud::PreEscaped(STYLE)) }
            }
            body {
                header {
                    svg
                        xmlns="http://www.w3.org/2000/svg"
                        width="24"
                        height="24"
                        viewBox="0 0 24 24"
                        fill="none"
                        stroke="#00d1b2"
                        stroke-width="2"
                        stroke-linecap="round"
                        stroke-linejoin="round"
                    {
                        path stroke="none" d="M0 0h24v24H0z" fill="none" {}
                        path d="M3 21l18 0" {}
                        path d="M5 21v-14l8 -4v18" {}
                        path d="M19 21v-10l-6 -4" {}
                    }
                    h3 { (title) }
                }
                (content)
            }
        }
    }
}
