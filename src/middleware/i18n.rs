// src/middleware/i18n.rs

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts, HeaderMap};

// Nosso extrator de idioma (do cabeçalho Accept-Language)
pub struct Locale(pub String);

impl Locale {
    /// Mesma lógica do extrator, mas utilizável fora de um handler
    /// (os guards de middleware só têm o request em mãos).
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let default_lang = "en".to_string();

        let lang = headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|header_value| header_value.to_str().ok())
            .and_then(|header_str| {
                accept_language::parse(header_str)
                    .first() // Pega o primeiro idioma (ex: "pt-BR")
                    .map(|tag_string| {
                        // "pt-BR" -> split vira ["pt", "BR"] -> next() pega "pt"
                        // "en"    -> split vira ["en"]       -> next() pega "en"
                        tag_string
                            .split('-')
                            .next()
                            .unwrap_or(tag_string)
                            .to_string()
                    })
            })
            .unwrap_or(default_lang);

        Locale(lang)
    }
}

impl<S> FromRequestParts<S> for Locale
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        Ok(Locale::from_headers(&parts.headers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn picks_primary_language_tag() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::ACCEPT_LANGUAGE,
            HeaderValue::from_static("pt-BR,pt;q=0.9,en;q=0.8"),
        );
        assert_eq!(Locale::from_headers(&headers).0, "pt");
    }

    #[test]
    fn defaults_to_english_without_header() {
        assert_eq!(Locale::from_headers(&HeaderMap::new()).0, "en");
    }
}
