use serde::Deserialize;

/// Query string of the paginated listing: `?pag=N`, with `?page=N` accepted
/// as an alias. `pag` wins when both are sent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub pag: Option<String>,
    pub page: Option<String>,
}

impl PageQuery {
    pub fn raw_page(&self) -> Option<&str> {
        self.pag.as_deref().or(self.page.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pag_takes_precedence_over_page() {
        let q = PageQuery {
            pag: Some("3".into()),
            page: Some("1".into()),
        };
        assert_eq!(q.raw_page(), Some("3"));

        let q = PageQuery {
            pag: None,
            page: Some("2".into()),
        };
        assert_eq!(q.raw_page(), Some("2"));
        assert_eq!(PageQuery::default().raw_page(), None);
    }
}
