//! Fixed option lists offered by the new-project wizard.
//!
//! Each entry is `(code, label)`. Records store the code; labels are what the
//! user sees. Codes are not validated against these lists beyond presence.

pub const OBJECTIVES: &[(&str, &str)] = &[
    ("funding", "Conseguir funding"),
    ("pmf", "Encontrar PMF"),
    ("launch", "Lanzar producto"),
    ("repositioning", "Reposicionar marca/narrativa"),
    ("gtm", "Diseñar GTM"),
    ("new-segment", "Entrar en nuevo segmento"),
];

pub const DURATIONS: &[(&str, &str)] = &[
    ("2-3-weeks", "2-3 semanas"),
    ("4-6-weeks-discovery", "4-6 semanas Discovery"),
    ("8-10-weeks-full", "8-10 semanas Discovery + Estrategia"),
    ("12plus-weeks-complete", "12+ semanas Proyecto completo"),
];

pub const DELIVERABLES: &[(&str, &str)] = &[
    ("discovery-only", "Solo Discovery"),
    ("discovery-strategy", "Discovery + Estrategia"),
    ("full-gtm", "GTM completo"),
    ("end-to-end", "Proyecto end-to-end"),
];

pub const BUDGETS: &[(&str, &str)] = &[
    ("5k-10k", "5K - 10K EUR"),
    ("10k-25k", "10K - 25K EUR"),
    ("25k-50k", "25K - 50K EUR"),
    ("50k-plus", "50K+ EUR"),
];

/// Look up the display label for an option code.
pub fn option_label(options: &[(&'static str, &'static str)], code: &str) -> Option<&'static str> {
    options
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, label)| *label)
}
