use sqlcrud::sql::{ast::Assignments, production::{Attribute, ProductionEngine}, types::Literal};
use tracing_subscriber::EnvFilter;

fn report(title: &str, attr: &Attribute) {
    println!("\n {}:", title);
    println!("   Code: {}", attr.code);
    println!("   Valid: {}", attr.valid);
    for err in &attr.errors {
        println!("   Error: {}", err);
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let engine = ProductionEngine::new();
    println!("SQL CRUD grammar");

    report("SELECT", &engine.select(["nombre", "edad"], "usuarios", Some("edad > 18")));
    report(
        "INSERT",
        &engine.insert("usuarios", ["id", "nombre"], [Literal::from(1), Literal::from("ana")]),
    );

    let mut assignments = Assignments::new();
    assignments.set("edad", 30.5);
    report("UPDATE", &engine.update("usuarios", assignments, Some("id = 1")));
    report("DELETE", &engine.delete("usuarios", Some("id = 5")));
}
