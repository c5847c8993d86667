use chrono::{TimeZone, Utc};
use serde_json::{json, Map};

use super::project::ProjectRecord;

/// Built-in demo records used when storage holds no usable project list.
pub fn sample_projects() -> Vec<ProjectRecord> {
    vec![
        ProjectRecord {
            id: "1".to_string(),
            name: "TechFlow Solutions".to_string(),
            industry: "Tecnología/SaaS".to_string(),
            model_type: "SaaS".to_string(),
            phase: "Pre-PMF".to_string(),
            region: "España".to_string(),
            objectives: vec!["pmf".to_string(), "gtm".to_string()],
            main_concerns: "Necesitamos encontrar PMF antes del próximo funding round".to_string(),
            main_opportunities: String::new(),
            duration: "4-6-weeks-discovery".to_string(),
            deliverable: "discovery-strategy".to_string(),
            budget: "25k-50k".to_string(),
            status: Some("En Discovery".to_string()),
            progress: 75,
            created: Utc.with_ymd_and_hms(2025, 11, 24, 0, 0, 0).single(),
            discovery: json!({
                "intake": { "completed": true, "data": {} },
                "jtbd": { "completed": true, "data": [] },
                "tensiones": { "completed": false, "data": {} },
                "audiencias": { "completed": false, "data": [] }
            }),
            strategy: json!({
                "valor": { "completed": false, "data": {} },
                "narrativa": { "completed": false, "data": {} }
            }),
            roadmap: json!({ "initiatives": [] }),
            extra: Map::new(),
        },
        ProjectRecord {
            id: "2".to_string(),
            name: "MarketPlace Pro".to_string(),
            industry: "E-commerce".to_string(),
            model_type: "Marketplace".to_string(),
            phase: "Post-PMF".to_string(),
            region: "Latinoamérica".to_string(),
            objectives: vec!["funding".to_string(), "new-segment".to_string()],
            main_concerns: "Necesitamos escalar a nuevos mercados".to_string(),
            main_opportunities: String::new(),
            duration: "8-10-weeks-full".to_string(),
            deliverable: "full-gtm".to_string(),
            budget: "50k-plus".to_string(),
            status: Some("En Estrategia".to_string()),
            progress: 45,
            created: Utc.with_ymd_and_hms(2025, 11, 20, 0, 0, 0).single(),
            discovery: json!({
                "intake": { "completed": true, "data": {} },
                "jtbd": { "completed": true, "data": [] },
                "tensiones": { "completed": true, "data": {} },
                "audiencias": { "completed": true, "data": [] }
            }),
            strategy: json!({
                "valor": { "completed": true, "data": {} },
                "narrativa": { "completed": false, "data": {} }
            }),
            roadmap: json!({ "initiatives": [] }),
            extra: Map::new(),
        },
    ]
}
