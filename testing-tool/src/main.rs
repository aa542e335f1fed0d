use anyhow::{bail, Context, Result};
use colored::*;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};
use std::io::{self, Write};
use std::time::Instant;

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
    user: Account,
}

#[derive(Debug, Deserialize)]
struct Account {
    email: String,
    role: String,
    driver_id: Option<String>,
}

struct Session {
    token: String,
    role: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    println!("{}", "🚕 Taxi Fleet Testing Tool".bright_blue().bold());
    println!("{}", "=====================================".bright_blue());
    println!();

    let base_url = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("API_BASE_URL").ok())
        .unwrap_or_else(|| "http://localhost:3000".to_string());
    let base_url = base_url.trim_end_matches('/').to_string();
    println!("{} {}", "🌐 Servidor:".bright_blue(), base_url);

    let client = Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .build()
        .context("No se pudo crear el cliente HTTP")?;

    // Paso 1: el servidor responde
    check_health(&client, &base_url).await?;

    // Paso 2: credenciales y token
    let session = login(&client, &base_url).await?;

    // Paso 3: menú principal
    loop {
        println!();
        println!("{}", "📋 MENÚ PRINCIPAL".bright_green().bold());
        println!("{}", "==================".bright_green());
        println!("1. 🩺 Estado de la base de datos");
        println!("2. 👤 Cuenta actual");
        println!("3. 🗒️  Feuilles de route");
        println!("4. 🧑‍✈️ Chauffeurs (admin)");
        println!("5. 📊 Dashboard (admin)");
        println!("6. 🚪 Salir");
        let choice = prompt("Selecciona una opción (1-6): ")?;

        let result = match choice.as_str() {
            "1" => check_database(&client, &base_url).await,
            "2" => show(&client, &base_url, "/api/auth/me", &session).await,
            "3" => {
                let path = if session.role == "admin" {
                    "/api/admin/shifts?limit=20"
                } else {
                    "/api/driver/shifts"
                };
                list(&client, &base_url, path, &session).await
            }
            "4" => list(&client, &base_url, "/api/admin/drivers", &session).await,
            "5" => show(&client, &base_url, "/api/admin/dashboard", &session).await,
            "6" => {
                println!("{}", "👋 ¡Hasta luego!".bright_green());
                break;
            }
            _ => {
                println!("{}", "❌ Opción inválida. Intenta de nuevo.".bright_red());
                Ok(())
            }
        };

        if let Err(e) = result {
            println!("{} {:#}", "❌ Error:".bright_red(), e);
        }
    }

    Ok(())
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label.bright_yellow());
    io::stdout().flush()?;
    let mut value = String::new();
    io::stdin().read_line(&mut value)?;
    Ok(value.trim().to_string())
}

async fn check_health(client: &Client, base_url: &str) -> Result<()> {
    let start = Instant::now();
    let response = client
        .get(format!("{}/health", base_url))
        .send()
        .await
        .context("El servidor no responde")?;
    let elapsed = start.elapsed().as_millis();

    if !response.status().is_success() {
        bail!("/health devolvió {}", response.status());
    }

    let body: Value = response.json().await?;
    println!(
        "{} {} v{} ({} ms)",
        "✅ Servidor OK:".bright_green(),
        body["service"].as_str().unwrap_or("?"),
        body["version"].as_str().unwrap_or("?"),
        elapsed
    );
    Ok(())
}

async fn check_database(client: &Client, base_url: &str) -> Result<()> {
    let response = client.get(format!("{}/health/db", base_url)).send().await?;
    let status = response.status();
    let body: Value = response.json().await?;

    if status == StatusCode::OK {
        println!("{}", "✅ Base de datos accesible".bright_green().bold());
    } else {
        println!("{}", "⚠️ Base de datos no disponible".bright_yellow().bold());
    }
    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}

async fn login(client: &Client, base_url: &str) -> Result<Session> {
    println!();
    println!("{}", "🔐 LOGIN".bright_cyan().bold());
    println!("{}", "========".bright_cyan());

    let email = prompt("Email: ")?;
    let password = prompt("Password: ")?;

    let response = client
        .post(format!("{}/api/auth/login", base_url))
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body: Value = response.json().await.unwrap_or(Value::Null);
        bail!(
            "Login rechazado ({}): {}",
            status,
            body["message"].as_str().unwrap_or("sin detalle")
        );
    }

    let login: LoginResponse = response.json().await.context("Respuesta de login inesperada")?;
    println!(
        "{} {} ({})",
        "✅ Autenticado:".bright_green().bold(),
        login.user.email,
        login.user.role
    );
    if let Some(driver_id) = &login.user.driver_id {
        println!("{} {}", "🚕 Chauffeur:".bright_blue(), driver_id);
    }

    Ok(Session {
        token: login.token,
        role: login.user.role,
    })
}

async fn fetch(client: &Client, base_url: &str, path: &str, session: &Session) -> Result<Value> {
    let response = client
        .get(format!("{}{}", base_url, path))
        .bearer_auth(&session.token)
        .send()
        .await?;

    let status = response.status();
    let body: Value = response.json().await.unwrap_or(Value::Null);
    if !status.is_success() {
        bail!(
            "{} devolvió {}: {}",
            path,
            status,
            body["message"].as_str().unwrap_or("sin detalle")
        );
    }
    Ok(body)
}

async fn show(client: &Client, base_url: &str, path: &str, session: &Session) -> Result<()> {
    let body = fetch(client, base_url, path, session).await?;
    println!("{}", serde_json::to_string_pretty(&body["data"])?);
    Ok(())
}

async fn list(client: &Client, base_url: &str, path: &str, session: &Session) -> Result<()> {
    let body = fetch(client, base_url, path, session).await?;
    let items = body["data"].as_array().cloned().unwrap_or_default();

    println!(
        "{}",
        format!("📦 {} elementos en {}", items.len(), path).bright_green().bold()
    );
    for item in items.iter().take(20) {
        println!("{}", serde_json::to_string(item)?);
    }
    if items.is_empty() {
        println!("{}", "⚠️ Lista vacía".bright_yellow());
    }
    Ok(())
}
