//! Plain-text rendering of project cards and dashboard stats.

use crate::models::{CardSummary, Stats};

const BAR_CELLS: usize = 10;
const FILLED: char = '█';
const EMPTY: char = '░';

const EMPTY_STATE: &str = "No hay proyectos aún\n\
Crea tu primer proyecto para comenzar con el discovery y estrategia\n";

/// Render a progress bar for a percentage in `0..=100`.
fn progress_bar(percent: u8) -> String {
    let filled = (percent.min(100) as usize * BAR_CELLS) / 100;
    let mut bar = String::with_capacity(BAR_CELLS * 3);
    bar.extend(std::iter::repeat(FILLED).take(filled));
    bar.extend(std::iter::repeat(EMPTY).take(BAR_CELLS - filled));
    bar
}

/// Render one card.
///
/// Example output:
/// ```text
/// TechFlow Solutions [SaaS]
///   Necesitamos encontrar PMF antes del próximo funding round
///   En Discovery (blue) · Discovery 75% ███████░░░
///   Última sesión: 24/11/2025 · id 1
/// ```
pub fn render_card(card: &CardSummary) -> String {
    format!(
        "{} [{}]\n  {}\n  {} ({}) · {} {}% {}\n  Última sesión: {} · id {}\n",
        card.name,
        card.badge,
        card.description,
        card.status_label,
        card.status_style.as_str(),
        card.progress_label,
        card.progress_percent,
        progress_bar(card.progress_percent),
        card.relative_date_label,
        card.id,
    )
}

/// Render all cards separated by blank lines, or the empty state.
pub fn render_cards(cards: &[CardSummary]) -> String {
    if cards.is_empty() {
        return EMPTY_STATE.to_string();
    }

    cards
        .iter()
        .map(render_card)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_stats(stats: &Stats) -> String {
    format!(
        "Proyectos: {}  Discovery: {}  Estrategia: {}  Éxito: {}%\n",
        stats.total, stats.discovery_count, stats.strategy_count, stats.success_rate_percent
    )
}
