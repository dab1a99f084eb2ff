/// Passes the item through while performing a side effect.
pub fn inspect<T>(mut f: impl FnMut(&T)) -> impl FnMut(T) -> Option<T> {
    move |item| {
        f(&item);
        Some(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reading::Reading;

    #[test]
    fn test_inspect_logic() {
        let mut seen = Vec::new();
        let mut pipe = inspect(|r: &Reading| seen.push(r.asset.clone()));

        let reading = Reading::single("pump", 1, "v", 1.0);
        let res = pipe(reading.clone());
        drop(pipe);

        assert_eq!(res, Some(reading));
        assert_eq!(seen, vec!["pump".to_string()]);
    }
}
