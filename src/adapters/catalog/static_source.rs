//! Embedded sample menu.
//!
//! Serves a fixed dataset compiled into the binary: pizzas in every
//! category plus the three companion datasets, each with gluten-free items.

use async_trait::async_trait;
use once_cell::sync::Lazy;

use crate::domain::catalog::{CatalogIndex, CatalogRow};
use crate::ports::{CatalogSource, CatalogSourceError};

// id, name, description, price, category, tags
type Entry = (&'static str, &'static str, &'static str, &'static str, &'static str, &'static str);

const MENU: &[Entry] = &[
    // Classiche
    ("margherita", "Margherita", "Pomodoro San Marzano, fior di latte, basilico", "€ 6,00", "classica", "popular, tradizionale, pomodoro"),
    ("marinara", "Marinara", "Pomodoro, aglio, origano, olio extravergine", "€ 5,00", "classica", "tradizionale, pomodoro, aglio"),
    ("diavola", "Diavola", "Pomodoro, fior di latte, salame piccante", "€ 7,50", "classica", "bestseller, piccante, salumi"),
    ("capricciosa", "Capricciosa", "Pomodoro, fior di latte, prosciutto cotto, funghi, carciofi, olive", "€ 8,50", "classica", "tradizionale, funghi, salumi"),
    ("quattro-formaggi", "Quattro formaggi", "Fior di latte, gorgonzola, provola, parmigiano", "€ 8,00", "classica", "formaggi, bianca"),
    ("napoli", "Napoli", "Pomodoro, fior di latte, acciughe, origano", "€ 7,00", "classica", "tradizionale, pomodoro, pesce"),
    ("bufalina", "Bufalina", "Pomodoro, mozzarella di bufala campana DOP, basilico", "€ 9,00", "classica", "premium, formaggi, pomodoro"),
    // Pizze d'autore
    ("tartufata", "Tartufata", "Crema di tartufo, fior di latte, funghi porcini, scaglie di tartufo", "€ 14,00", "pizze-d'autore", "premium, tartufo, funghi, gourmet"),
    ("pistacchio-mortadella", "Pistacchio e mortadella", "Fior di latte, mortadella IGP, pesto e granella di pistacchio", "€ 12,00", "pizze-d'autore", "popular, pistacchio, salumi, gourmet"),
    ("genovese", "Genovese", "Pesto di basilico, stracciatella, pomodorini confit", "€ 11,00", "pizze-d'autore", "pesto, formaggi, gourmet"),
    ("nduja-burrata", "'Nduja e burrata", "Pomodoro, 'nduja di Spilinga, burrata pugliese", "€ 12,50", "pizze-d'autore", "hot, piccante, formaggi"),
    // Vegane
    ("ortolana", "Ortolana", "Pomodoro, zucchine, melanzane, peperoni grigliati", "€ 8,00", "vegana", "vegano, verdure"),
    ("marinara-vegana", "Marinara vegana", "Pomodoro, aglio, origano, capperi", "€ 6,00", "vegana", "vegano, pomodoro"),
    ("rucola-pomodorini", "Rucola e pomodorini", "Pomodoro, rucola, pomodorini, olio al basilico", "€ 7,50", "vegana", "popular, vegano, verdure"),
    // Senza glutine
    ("margherita-senza-glutine", "Margherita senza glutine", "Impasto certificato, pomodoro, fior di latte, basilico", "€ 8,00", "senza-glutine", "popular, tradizionale"),
    ("diavola-senza-glutine", "Diavola senza glutine", "Impasto certificato, pomodoro, fior di latte, salame piccante", "€ 9,50", "senza-glutine", "piccante, salumi"),
    ("ortolana-senza-glutine", "Ortolana senza glutine", "Impasto certificato, pomodoro, verdure grigliate", "€ 9,50", "senza-glutine", "vegano, verdure"),
    // Bevande
    ("birra-artigianale", "Birra artigianale IPA", "Birrificio locale, 33 cl", "€ 5,50", "beverages", "birra, artigianale"),
    ("birra-chiara", "Birra chiara alla spina", "40 cl", "€ 4,50", "beverages", "birra, classico"),
    ("birra-senza-glutine", "Birra senza glutine", "33 cl", "€ 5,00", "beverages", "birra, senza-glutine"),
    ("vino-rosso", "Aglianico in calice", "Calice di rosso campano", "€ 6,00", "beverages", "vino, artigianale"),
    ("coca-cola", "Coca-Cola", "33 cl", "€ 3,00", "beverages", "classico, senza-glutine"),
    ("acqua", "Acqua minerale", "50 cl", "€ 1,50", "beverages", "classico, senza-glutine, vegano"),
    // Frittatine
    ("frittatina-classica", "Frittatina classica", "Bucatini, besciamella, piselli, prosciutto", "€ 3,50", "frittatine", "tradizionale, classico"),
    ("frittatina-nerano", "Frittatina alla Nerano", "Zucchine, provolone del Monaco, basilico", "€ 4,00", "frittatine", "gourmet"),
    ("frittatina-vegana", "Frittatina vegana", "Pasta, ragù di verdure, pomodoro", "€ 3,50", "frittatine", "vegano"),
    ("crocche-senza-glutine", "Crocchè senza glutine", "Patate, fritto in olio dedicato", "€ 3,00", "frittatine", "senza-glutine, tradizionale"),
    // Dolci
    ("tiramisu", "Tiramisù", "Savoiardi, mascarpone, caffè", "€ 5,00", "desserts", "tradizionale"),
    ("baba", "Babà al rum", "Ricetta napoletana", "€ 4,50", "desserts", "tradizionale, artigianale"),
    ("cheesecake-pistacchio", "Cheesecake al pistacchio", "Base croccante, crema di pistacchio", "€ 6,00", "desserts", "gourmet, artigianale"),
    ("sorbetto-limone", "Sorbetto al limone", "Limoni di Sorrento", "€ 4,00", "desserts", "vegano, senza-glutine"),
    ("panna-cotta", "Panna cotta", "Con coulis di frutti di bosco", "€ 4,50", "desserts", "senza-glutine"),
];

static SAMPLE_ROWS: Lazy<Vec<CatalogRow>> = Lazy::new(|| {
    MENU.iter()
        .map(|&(id, name, description, price, category, tags)| CatalogRow {
            id: Some(id.to_string()),
            name: Some(name.to_string()),
            description: Some(description.to_string()),
            price: Some(price.to_string()),
            category: Some(category.to_string()),
            tags: Some(tags.to_string()),
            image: None,
        })
        .collect()
});

/// Catalog source over an in-memory row set.
#[derive(Debug, Clone)]
pub struct StaticCatalogSource {
    rows: Vec<CatalogRow>,
}

impl StaticCatalogSource {
    /// The embedded sample menu.
    pub fn new() -> Self {
        Self {
            rows: SAMPLE_ROWS.clone(),
        }
    }

    /// Serves the given rows instead of the sample menu.
    pub fn with_rows(rows: Vec<CatalogRow>) -> Self {
        Self { rows }
    }

    /// Index over the sample menu, for callers that need no source at all.
    pub fn sample_index() -> CatalogIndex {
        CatalogIndex::from_rows(SAMPLE_ROWS.iter().cloned())
    }
}

impl Default for StaticCatalogSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogSource for StaticCatalogSource {
    async fn fetch_rows(&self) -> Result<Vec<CatalogRow>, CatalogSourceError> {
        Ok(self.rows.clone())
    }
}
