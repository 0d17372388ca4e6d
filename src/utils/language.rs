use serde::Deserialize;

/// Display language for learner-facing content. Spanish text falls
/// back to English when a translation is missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    En,
    Es,
}

impl Lang {
    pub fn from_code(code: &str) -> Self {
        let code = code.trim().to_ascii_lowercase();
        if code == "es" || code.starts_with("es-") {
            Lang::Es
        } else {
            Lang::En
        }
    }

    pub fn pick<'a>(&self, en: &'a str, es: &'a str) -> &'a str {
        match self {
            Lang::En => en,
            Lang::Es => {
                if es.is_empty() {
                    en
                } else {
                    es
                }
            }
        }
    }

    pub fn pick_opt(&self, en: &Option<String>, es: &Option<String>) -> Option<String> {
        match self {
            Lang::En => en.clone(),
            Lang::Es => es.clone().filter(|s| !s.is_empty()).or_else(|| en.clone()),
        }
    }
}

/// Query-string wrapper (`?lang=es`) shared by the learner routes.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct LangQuery {
    pub lang: Option<Lang>,
}

impl LangQuery {
    pub fn resolve(&self) -> Lang {
        self.lang.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_resolve_with_region_subtags() {
        assert_eq!(Lang::from_code("es"), Lang::Es);
        assert_eq!(Lang::from_code("ES-mx"), Lang::Es);
        assert_eq!(Lang::from_code("en"), Lang::En);
        assert_eq!(Lang::from_code("fr"), Lang::En);
    }

    #[test]
    fn spanish_falls_back_to_english_when_blank() {
        assert_eq!(Lang::Es.pick("hello", ""), "hello");
        assert_eq!(Lang::Es.pick("hello", "hola"), "hola");
        assert_eq!(
            Lang::Es.pick_opt(&Some("hello".into()), &None),
            Some("hello".to_string())
        );
    }
}
