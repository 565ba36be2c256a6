pub(crate) trait StringExt {
    fn add(&mut self, ch: char) -> &mut Self;

    fn add_str(&mut self, s: &str) -> &mut Self;

    /// Appends `item` for each element, separated by `sep`.
    fn add_list<T, F>(
        &mut self,
        items: impl IntoIterator<Item = T>,
        sep: &str,
        item: F,
    ) -> &mut Self
    where
        F: FnMut(&mut Self, T);
}

impl StringExt for String {
    fn add(&mut self, ch: char) -> &mut Self {
        self.push(ch);
        self
    }

    fn add_str(&mut self, s: &str) -> &mut Self {
        self.push_str(s);
        self
    }

    fn add_list<T, F>(
        &mut self,
        items: impl IntoIterator<Item = T>,
        sep: &str,
        mut item: F,
    ) -> &mut Self
    where
        F: FnMut(&mut Self, T),
    {
        for (index, v) in items.into_iter().enumerate() {
            if index > 0 {
                self.push_str(sep);
            }

            item(self, v);
        }

        self
    }
}
