use catalogue_core::{CatalogueViewModel, DisplayCard, FetchPhase, PagerControls};
use url::Url;

const RULE: &str = "------------------------------------------------------------";

/// Plain-text frame for the current view, one entry per output line.
pub fn render(view: &CatalogueViewModel, location: &Url) -> Vec<String> {
    let mut lines = vec![
        RULE.to_string(),
        location.to_string(),
        format!(
            "Sort: {} | Per page: {} | {}",
            view.query.sort,
            view.query.page_size,
            view.summary()
        ),
    ];

    match view.phase {
        FetchPhase::Idle => {}
        FetchPhase::Loading => lines.push("Loading...".to_string()),
        FetchPhase::Error => {
            lines.push(format!(
                "Error: {}",
                view.error_message.as_deref().unwrap_or("unknown failure")
            ));
            lines.push("Type `r` to retry.".to_string());
        }
        FetchPhase::Success if view.cards.is_empty() => lines.push("No items.".to_string()),
        FetchPhase::Success => {
            for card in &view.cards {
                lines.push(String::new());
                render_card(card, &mut lines);
            }
        }
    }

    if view.show_pager {
        lines.push(String::new());
        lines.push(render_pager(&view.pager, view.total_pages));
    }
    lines.push(RULE.to_string());
    lines
}

fn render_card(card: &DisplayCard, lines: &mut Vec<String>) {
    lines.push(format!("# {}", card.title));
    if let Some(date) = &card.formatted_date {
        lines.push(format!("  {date}"));
    }
    lines.push(format!("  {}", card.excerpt));
    lines.push(format!("  image: {}", card.image_url));
}

/// `<< < 1 [2] 3 4 5 > >>  (page 2 of 16)`; disabled controls are shown as `..`.
fn render_pager(pager: &PagerControls, total_pages: u32) -> String {
    let control = |label: &'static str, enabled: bool| if enabled { label } else { ".." };
    let pages: Vec<String> = pager
        .pages
        .iter()
        .map(|page| {
            if *page == pager.current {
                format!("[{page}]")
            } else {
                page.to_string()
            }
        })
        .collect();

    format!(
        "{} {} {} {} {}  (page {} of {})",
        control("<<", pager.first_enabled),
        control("<", pager.previous_enabled),
        pages.join(" "),
        control(">", pager.next_enabled),
        control(">>", pager.last_enabled),
        pager.current,
        total_pages
    )
}
