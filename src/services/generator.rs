//! Fake expense generator
//!
//! Fills the store with plausible test data: a predefined category, one of
//! that category's descriptions, an amount between 20.00 and 1500.00 and a
//! date within the last 90 days.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::info;

use crate::config::settings::MAX_GENERATE_COUNT;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Category, Expense, ExpenseDate, ExpenseId, Money, PREDEFINED};
use crate::storage::ExpenseStore;

const MIN_CENTS: i64 = 2_000;
const MAX_CENTS: i64 = 150_000;
const MAX_DAYS_AGO: i64 = 90;

/// Sample descriptions for a predefined category
pub fn descriptions_for(category: &str) -> &'static [&'static str] {
    match category {
        "Comida" => &[
            "Almuerzo en restaurante",
            "Supermercado semanal",
            "Café y postre",
            "Cena a domicilio",
        ],
        "Transporte" => &[
            "Boleto de bus",
            "Combustible",
            "Pasaje de tren",
            "Viaje en taxi",
        ],
        "Entretenimiento" => &[
            "Entrada de cine",
            "Concierto",
            "Videojuego",
            "Streaming mensual",
        ],
        "Hogar" => &[
            "Factura de luz",
            "Alquiler",
            "Productos de limpieza",
            "Reparación de grifo",
        ],
        "Salud" => &[
            "Consulta médica",
            "Medicamentos",
            "Suplementos vitamínicos",
            "Gimnasio",
        ],
        "Compras" => &[
            "Ropa nueva",
            "Electrónicos",
            "Libro",
            "Regalo de cumpleaños",
        ],
        _ => &["Regalo", "Suscripción", "Donación", "Servicios varios"],
    }
}

/// Build one random expense dated relative to `today`
pub fn random_expense<R: Rng + ?Sized>(rng: &mut R, today: ExpenseDate) -> Expense {
    let category = PREDEFINED.choose(rng).copied().unwrap_or(PREDEFINED[0]);
    let description = descriptions_for(category)
        .choose(rng)
        .copied()
        .unwrap_or_default();
    let amount = Money::from_cents(rng.gen_range(MIN_CENTS..=MAX_CENTS));
    let date = today.add_days(-rng.gen_range(0..=MAX_DAYS_AGO));

    Expense::new(Category::new(category), amount, date, description)
}

/// Insert `count` random expenses, returning their ids
pub fn generate<R: Rng + ?Sized>(
    store: &mut ExpenseStore,
    count: usize,
    rng: &mut R,
) -> ExpenseResult<Vec<ExpenseId>> {
    if !(1..=MAX_GENERATE_COUNT).contains(&count) {
        return Err(ExpenseError::Validation(format!(
            "Count must be between 1 and {}",
            MAX_GENERATE_COUNT
        )));
    }

    let today = ExpenseDate::today();
    let ids: Vec<ExpenseId> = (0..count)
        .map(|_| store.insert(random_expense(rng, today)))
        .collect();

    info!(count, "generated fake expenses");
    Ok(ids)
}
