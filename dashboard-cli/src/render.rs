use dashboard_core::{Banner, Suggestion, UiState, WeatherResult};

const BAR_WIDTH: usize = 20;

/// Text for whichever of loading / error / result the state is in.
pub fn render_state(state: &UiState) -> String {
    if state.loading {
        return "Loading...".to_string();
    }
    if let Some(error) = &state.error {
        return error.clone();
    }
    state.weather.as_ref().map(render_weather).unwrap_or_default()
}

pub fn render_weather(w: &WeatherResult) -> String {
    let heading = if w.country.is_empty() {
        w.city.clone()
    } else {
        format!("{}, {}", w.city, w.country)
    };

    let mut out = format!(
        "{heading}\n{}°C\n💨 {} km/h   🧭 {}°   🌦️ Code: {} ({})",
        w.temperature,
        w.windspeed,
        w.winddirection,
        w.weathercode,
        w.condition().description(),
    );

    if let Some(at) = w.observed_at {
        out.push_str(&format!("\nObserved {}", at.format("%Y-%m-%d %H:%M")));
    }

    out
}

pub fn render_suggestion(s: &Suggestion) -> String {
    format!("{} ({:.4}, {:.4})", s.label(), s.latitude, s.longitude)
}

pub fn render_banner(banner: &Banner) -> Option<String> {
    let fact = banner.current_fact()?;
    let filled = usize::from(banner.state().progress) * BAR_WIDTH / 100;

    Some(format!(
        "💡 {fact}\n[{}{}]",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled)
    ))
}
