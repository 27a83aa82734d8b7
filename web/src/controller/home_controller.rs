use axum::extract::State;
use axum::response::Html;
use log::*;
use service::AppState;

const HOME_TEMPLATE: &str = include_str!("../../templates/home.html");
const ECHO_URL_PLACEHOLDER: &str = "{{echo_url}}";

/// GET the demo page that posts to the echo endpoint and prints the stream.
pub async fn index(State(app_state): State<AppState>) -> Html<String> {
    debug!("Rendering home page");
    Html(render(&app_state.config.echo_url()))
}

fn render(echo_url: &str) -> String {
    HOME_TEMPLATE.replace(ECHO_URL_PLACEHOLDER, echo_url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_fills_in_echo_url() {
        let page = render("http://localhost:8080/echo");

        assert!(page.contains(r#"fetch("http://localhost:8080/echo""#));
        assert!(
            !page.contains(ECHO_URL_PLACEHOLDER),
            "placeholder should be replaced"
        );
    }
}
