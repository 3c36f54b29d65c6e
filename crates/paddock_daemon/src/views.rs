//! HTML pages and user-facing messages.

use paddock_core::{
    average_performance, Constants, OnboardingError, RaceError, RaceResult, ResearchError,
    TeamState,
};

use crate::state::ClockMode;

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"es\">\n<head><meta charset=\"utf-8\">\
         <title>{title}</title></head>\n<body>\n{body}</body>\n</html>\n"
    )
}

fn flash_block(flash: Option<&str>) -> String {
    flash.map_or_else(String::new, |message| {
        format!("<p class=\"flash\">{}</p>\n", escape(message))
    })
}

pub fn dashboard(
    team: &TeamState,
    constants: &Constants,
    flash: Option<&str>,
    clock: ClockMode,
) -> String {
    let player = &team.player;
    let mut body = flash_block(flash);
    let director = player.director.as_deref().unwrap_or("Sin director");
    body.push_str(&format!("<h1>Escudería de {}</h1>\n", escape(director)));
    body.push_str(&format!(
        "<p>Día <span id=\"dia\">{}</span> · Dinero <span id=\"dinero\">{} €</span></p>\n",
        player.day, player.money
    ));

    match &player.project {
        Some(project) => {
            body.push_str(&format!(
                "<p id=\"proyecto\">I+D en curso: {} (termina el día {}, faltan {} días)</p>\n",
                escape(&project.component),
                project.completes_on_day,
                project.completes_on_day.saturating_sub(player.day)
            ));
        }
        None => body.push_str("<p id=\"proyecto\">Sin proyecto de I+D activo</p>\n"),
    }

    body.push_str(
        "<table>\n<tr><th>Componente</th><th>Nivel</th><th>Rendimiento</th>\
         <th>Coste mejora</th><th></th></tr>\n",
    );
    for component in &team.components {
        let action = if player.is_researching() {
            String::new()
        } else {
            format!(
                "<a href=\"/iniciar_rd/{}\">Investigar</a>",
                urlencoding::encode(&component.name)
            )
        };
        body.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{:.1}</td><td>{} €</td><td>{action}</td></tr>\n",
            escape(&component.name),
            component.level,
            component.performance(constants),
            component.research_cost()
        ));
    }
    body.push_str("</table>\n");

    if let Some(average) = average_performance(&team.components, constants) {
        body.push_str(&format!("<p>Rendimiento medio: {average:.2}</p>\n"));
    }

    body.push_str("<nav>\n<a href=\"/carrera\">Correr carrera</a>\n");
    if clock == ClockMode::Manual {
        body.push_str("<a href=\"/avanzar\">Avanzar día</a>\n");
    }
    body.push_str("<a href=\"/reset\">Empezar de nuevo</a>\n</nav>\n");

    page("Paddock", &body)
}

pub fn race_result(team: &TeamState, result: &RaceResult) -> String {
    let mut body = String::new();
    body.push_str(&format!("<h1>Carrera del día {}</h1>\n", team.player.day));
    body.push_str(&format!(
        "<p>Posición final: <span id=\"posicion\">{}</span></p>\n",
        result.position
    ));
    body.push_str(&format!(
        "<p>Rendimiento medio: {:.2}</p>\n",
        result.average_performance
    ));
    body.push_str(&format!(
        "<p>Premio: <span id=\"premio\">{} €</span> · Saldo: {} €</p>\n",
        result.payout, team.player.money
    ));
    body.push_str("<a href=\"/\">Volver al garaje</a>\n");
    page("Resultado de carrera", &body)
}

pub fn onboarding(error: Option<&str>) -> String {
    let mut body = String::from("<h1>Bienvenido al paddock</h1>\n");
    body.push_str(&flash_block(error));
    body.push_str(
        "<form method=\"post\" action=\"/bienvenida\">\n\
         <label>Nombre del director <input name=\"nombre\" autofocus></label>\n\
         <button type=\"submit\">Fundar escudería</button>\n</form>\n",
    );
    page("Bienvenida", &body)
}

pub fn research_error_message(err: &ResearchError) -> String {
    match err {
        ResearchError::ProjectInProgress { component } => {
            format!("Ya hay un proyecto de I+D en curso ({component}).")
        }
        ResearchError::UnknownComponent { component } => {
            format!("No existe el componente {component}.")
        }
        ResearchError::InsufficientFunds { cost, available } => {
            format!("Dinero insuficiente: la mejora cuesta {cost} € y tienes {available} €.")
        }
    }
}

pub fn race_error_message(err: &RaceError) -> String {
    match err {
        RaceError::AlreadyRacedToday { day } => {
            format!("Ya has corrido hoy (día {day}). Vuelve mañana.")
        }
        RaceError::NoComponents => "Tu escudería no tiene componentes para correr.".to_string(),
    }
}

pub fn onboarding_error_message(err: &OnboardingError) -> &'static str {
    match err {
        OnboardingError::EmptyDirectorName => "Escribe el nombre del director.",
    }
}
