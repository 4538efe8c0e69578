//! End-to-end tests of the `gastos` binary

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn gastos(file: &Path) -> Command {
    let mut cmd = Command::cargo_bin("gastos").unwrap();
    cmd.arg("--file").arg(file);
    cmd.env_remove("GASTOS_FILE");
    cmd.env_remove("GASTOS_ID_SCHEME");
    cmd.env_remove("RUST_LOG");
    cmd
}

fn add(file: &Path, amount: &str, category: &str, description: &str) {
    gastos(file)
        .args(["add", amount, "-c", category, "-d", "05/03/2024", "-D", description])
        .assert()
        .success()
        .stdout(predicate::str::contains("Gasto agregado"));
}

#[test]
fn add_then_list() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("gastos.json");

    add(&file, "15,50", "Comida", "Almuerzo");
    assert!(file.exists());

    gastos(&file)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("$15.50"))
        .stdout(predicate::str::contains("Almuerzo"))
        .stdout(predicate::str::contains("1 gasto(s)"));
}

#[test]
fn list_empty_file() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("gastos.json");

    gastos(&file)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No hay gastos registrados."));
    assert!(!file.exists());
}

#[test]
fn show_unknown_id_fails() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("gastos.json");

    gastos(&file)
        .args(["show", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Expense not found: 42"));
}

#[test]
fn invalid_amount_fails() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("gastos.json");

    gastos(&file)
        .args(["add", "doce"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Validation error"));
    assert!(!file.exists());
}

#[test]
fn amount_above_limit_fails() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("gastos.json");

    gastos(&file)
        .args(["add", "50000000000000000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Amount too large"));
    assert!(!file.exists());
}

#[test]
fn keyed_file_with_a_broken_entry_keeps_the_rest() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("gastos.json");
    fs::write(
        &file,
        r#"{"1": {"fecha": "01/01/2024", "monto": 4, "descripcion": "Pan"},
            "2": {"fecha": "02/01/2024", "monto": 6, "descripcion": "Leche"},
            "3": null}"#,
    )
    .unwrap();

    gastos(&file)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Pan"))
        .stdout(predicate::str::contains("Leche"))
        .stdout(predicate::str::contains("2 gasto(s)"));
}

#[test]
fn delete_requires_force() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("gastos.json");
    add(&file, "8", "Transporte", "Taxi");

    gastos(&file)
        .args(["delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--force"));
    gastos(&file)
        .arg("list")
        .assert()
        .stdout(predicate::str::contains("Taxi"));

    gastos(&file)
        .args(["delete", "1", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Gasto eliminado"));
    gastos(&file)
        .arg("list")
        .assert()
        .stdout(predicate::str::contains("No hay gastos registrados."));
}

#[test]
fn update_changes_amount() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("gastos.json");
    add(&file, "8", "Transporte", "Taxi");

    gastos(&file)
        .args(["update", "1", "--amount", "9.75"])
        .assert()
        .success();
    gastos(&file)
        .args(["show", "1"])
        .assert()
        .stdout(predicate::str::contains("$9.75"));
}

#[test]
fn search_is_case_insensitive() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("gastos.json");
    add(&file, "3", "Comida", "Café");
    add(&file, "20", "Hogar", "Lámpara");

    gastos(&file)
        .args(["search", "comida"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Café"))
        .stdout(predicate::str::contains("Lámpara").not());
}

#[test]
fn generate_with_seed() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("gastos.json");

    gastos(&file)
        .args(["generate", "25", "--seed", "7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Se generaron 25 gastos"));
    gastos(&file)
        .arg("list")
        .assert()
        .stdout(predicate::str::contains("25 gasto(s)"));

    gastos(&file)
        .args(["generate", "0"])
        .assert()
        .failure();
}

#[test]
fn export_then_import() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("gastos.json");
    let csv = dir.path().join("copia.csv");
    add(&file, "12", "Salud", "Farmacia");
    add(&file, "4.30", "Comida", "Pan");

    gastos(&file)
        .arg("export")
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 gasto(s) exportados"));
    let content = fs::read_to_string(&csv).unwrap();
    assert!(content.starts_with("id,fecha,categoria,descripcion,monto"));

    let other = dir.path().join("otro.json");
    gastos(&other)
        .arg("import")
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 gasto(s) importados"));
    gastos(&other)
        .arg("list")
        .assert()
        .stdout(predicate::str::contains("Farmacia"))
        .stdout(predicate::str::contains("Pan"));
}

#[test]
fn import_unknown_extension_fails() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("gastos.json");
    let bogus = dir.path().join("datos.xml");
    fs::write(&bogus, "<gastos/>").unwrap();

    gastos(&file)
        .arg("import")
        .arg(&bogus)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported format"));
}

#[test]
fn chart_text_and_svg() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("gastos.json");
    add(&file, "30", "Hogar", "Luz");
    add(&file, "10", "Comida", "Fruta");

    gastos(&file)
        .args(["chart", "bar", "--text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Gasto total por categoría"))
        .stdout(predicate::str::contains("Hogar"));

    let svg = dir.path().join("torta.svg");
    gastos(&file)
        .args(["chart", "pie", "-o"])
        .arg(&svg)
        .assert()
        .success()
        .stdout(predicate::str::contains("Gráfico guardado"));
    assert!(fs::read_to_string(&svg).unwrap().contains("<svg"));
}

#[test]
fn summary_lists_categories() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("gastos.json");
    add(&file, "30", "Hogar", "Luz");
    add(&file, "10", "Comida", "Fruta");

    gastos(&file)
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("Resumen de gastos"))
        .stdout(predicate::str::contains("75.0%"));
}

#[test]
fn config_shows_paths() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("gastos.json");

    gastos(&file)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuración de gastos"))
        .stdout(predicate::str::contains("gastos.json"));
}

#[test]
fn menu_exit() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("gastos.json");

    gastos(&file)
        .write_stdin("0\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("GESTOR DE GASTOS"))
        .stdout(predicate::str::contains("¡Hasta luego!"));
}

#[test]
fn menu_add_and_save() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("gastos.json");

    // add: category 1, description, amount, date; then exit saving
    gastos(&file)
        .write_stdin("1\n1\nMenú del día\n9.90\n01/04/2024\n0\ns\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("¡Hasta luego!"));

    assert!(fs::read_to_string(&file).unwrap().contains("Menú del día"));
}
