//! Bot copy.
//!
//! Every sentence the bot says lives here so the flow handler reads as pure
//! control flow.

use crate::domain::catalog::{format_price_cents, Category, CompanionKind, MenuItem};

pub const GREETING: &str = "Ciao! 👋 Sono l'assistente della nostra pizzeria.";
pub const ASK_CATEGORY: &str = "Che tipo di pizza ti va oggi?";
pub const SHOW_CATEGORIES: &str = "Ecco le nostre categorie: scegli quella che preferisci.";
pub const ASK_TAGS: &str = "Hai qualche preferenza? Scegli un gusto e ti consiglio le pizze migliori.";
pub const SKIP_TAGS: &str = "Nessuna preferenza";
pub const ASK_COMPANIONS: &str = "Vuoi aggiungere qualcosa per accompagnare la tua pizza?";
pub const NO_COMPANIONS: &str = "No grazie, va bene così";
pub const COMING_SOON: &str =
    "Il menu non è ancora disponibile, stiamo sfornando le novità! Torna a trovarci a breve. 🍕";
pub const APOLOGY: &str = "Mi dispiace, non ho capito la tua scelta. Vuoi ricominciare?";
pub const FAREWELL: &str = "Grazie per averci scelto, buon appetito! 😋";
pub const MENU_FILTER_FALLBACK: &str =
    "Scorri la pagina per vedere il menu completo con tutte le nostre specialità.";

pub const GF_INTRO: &str =
    "Per chi non può mangiare glutine abbiamo un percorso dedicato: impasto certificato, forno separato e accompagnamenti selezionati.";
pub const GF_ASK: &str = "Cosa vuoi scoprire?";
pub const GF_PIZZAS: &str = "🍕 Pizze senza glutine";
pub const GF_COMPLETE_MENU: &str = "📋 Menu completo senza glutine";
pub const GF_CHOOSE_PIZZA: &str = "Scegli la tua pizza senza glutine:";

pub fn pizza_list_intro(category: Category, tags: &[String]) -> String {
    let subject = match category {
        Category::All => "tutte le nostre pizze".to_string(),
        other => format!("le pizze {}", other.label().to_lowercase()),
    };
    if tags.is_empty() {
        format!("Ecco {}, a partire dalle più amate:", subject)
    } else {
        format!("Ecco {} più adatte a te ({}):", subject, tags.join(", "))
    }
}

pub fn item_chosen(item: &MenuItem) -> String {
    format!("Ottima scelta! {} ({}) 👌", item.name(), item.price())
}

pub fn similar_suggestion(similar: &[&MenuItem]) -> String {
    let names: Vec<&str> = similar.iter().map(|i| i.name()).collect();
    format!("Se ti piace, prova anche: {}.", names.join(", "))
}

pub fn companion_list_intro(kind: CompanionKind, gluten_free: bool) -> String {
    if gluten_free {
        format!("Ecco i nostri {} senza glutine:", kind.label().to_lowercase())
    } else {
        format!("Ecco i {} che ti consiglio:", kind.label().to_lowercase())
    }
}

pub fn companion_unavailable(kind: CompanionKind) -> String {
    format!(
        "Al momento non abbiamo {} disponibili. Vuoi provare altro?",
        kind.label().to_lowercase()
    )
}

pub fn gluten_free_listing(kind: CompanionKind, items: &[&MenuItem]) -> String {
    if items.is_empty() {
        return companion_unavailable(kind);
    }
    let mut out = format!("{} senza glutine:", kind.label());
    for item in items {
        out.push_str(&format!("\n• {} - {}", item.name(), item.price()));
    }
    out
}

pub fn menu_filtered(category: Category) -> String {
    format!("Ho filtrato il menu per te: {}. 👇", category.label())
}

/// Order recap; the total is added only when every price is readable.
pub fn order_summary(item: &MenuItem, companions: &[MenuItem]) -> String {
    let mut out = String::from("Ecco il riepilogo della tua scelta:");
    out.push_str(&format!("\n• {} - {}", item.name(), item.price()));
    for companion in companions {
        out.push_str(&format!("\n• {} - {}", companion.name(), companion.price()));
    }

    let total: Option<u64> = std::iter::once(item)
        .chain(companions.iter())
        .map(MenuItem::price_cents)
        .sum();
    if let Some(total) = total {
        out.push_str(&format!("\nTotale: {}", format_price_cents(total)));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ItemId;

    fn item(id: &str, price: &str) -> MenuItem {
        MenuItem::builder(ItemId::new(id).unwrap(), id, price)
            .categories(["classica"])
            .build()
            .unwrap()
    }

    #[test]
    fn summary_includes_total_when_prices_parse() {
        let text = order_summary(&item("Diavola", "€ 8,00"), &[item("Birra", "€ 4,50")]);
        assert!(text.contains("Diavola"));
        assert!(text.contains("Birra"));
        assert!(text.contains("Totale: € 12,50"));
    }

    #[test]
    fn summary_omits_total_when_a_price_is_unreadable() {
        let text = order_summary(&item("Diavola", "€ 8,00"), &[item("Vino", "a calice")]);
        assert!(!text.contains("Totale"));
    }

    #[test]
    fn pizza_list_intro_mentions_tags() {
        let text = pizza_list_intro(Category::Classica, &["piccante".to_string()]);
        assert!(text.contains("piccante"));
    }
}
