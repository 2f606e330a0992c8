use maud::{html, Markup};

pub fn card(title: &str, body: Markup) -> Markup {
    html! {
        section class="card" {
            h3 { (title) }
            (body)
        }
    }
}

pub fn metric(label: &str, value: &str) -> Markup {
    html! {
        div class="card" {
            div style="font-size: 0.85em; color: #9aa0b0;" { (label) }
            div style="font-size: 1.6em; font-weight: 600;" { (value) }
        }
    }
}
