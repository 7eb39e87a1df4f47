/// 페이지 요청
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub number: i64,
    pub size: i64,
}

impl Page {
    /// 1 미만의 페이지 번호는 1로 취급
    pub fn new(number: Option<i64>, size: i64) -> Self {
        Self {
            number: number.unwrap_or(1).max(1),
            size: size.max(1),
        }
    }

    /// 전체 항목 수에 맞춰 마지막 페이지로 제한
    pub fn clamp(self, total_items: i64) -> Self {
        Self {
            number: self.number.min(total_pages(total_items, self.size)),
            size: self.size,
        }
    }

    pub fn offset(&self) -> i64 {
        (self.number - 1) * self.size
    }

    pub fn limit(&self) -> i64 {
        self.size
    }
}

fn total_pages(total_items: i64, size: i64) -> i64 {
    ((total_items + size - 1) / size).max(1)
}

/// 페이지 단위 조회 결과
#[derive(Debug, Clone)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub number: i64,
    pub total_pages: i64,
    pub total_items: i64,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, page: Page, total_items: i64) -> Self {
        Self {
            items,
            number: page.number,
            total_pages: total_pages(total_items, page.size),
            total_items,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }

    pub fn previous_page(&self) -> i64 {
        (self.number - 1).max(1)
    }

    pub fn next_page(&self) -> i64 {
        (self.number + 1).min(self.total_pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_defaults_to_first() {
        let page = Page::new(None, 10);
        assert_eq!(page.number, 1);
        assert_eq!(page.offset(), 0);
        assert_eq!(Page::new(Some(-3), 10).number, 1);
    }

    #[test]
    fn offset_follows_page_number() {
        let page = Page::new(Some(3), 10);
        assert_eq!(page.offset(), 20);
        assert_eq!(page.limit(), 10);
    }

    #[test]
    fn clamp_keeps_page_within_results() {
        assert_eq!(Page::new(Some(9), 10).clamp(25).number, 3);
        assert_eq!(Page::new(Some(9), 10).clamp(0).number, 1);
        assert_eq!(Page::new(Some(2), 10).clamp(25).number, 2);
    }

    #[test]
    fn paginated_navigation() {
        let page = Page::new(Some(2), 10);
        let result = Paginated::new(vec![0; 10], page, 30);
        assert_eq!(result.total_pages, 3);
        assert!(result.has_previous());
        assert!(result.has_next());
        assert_eq!(result.previous_page(), 1);
        assert_eq!(result.next_page(), 3);

        let single = Paginated::new(Vec::<i32>::new(), Page::new(None, 10), 0);
        assert_eq!(single.total_pages, 1);
        assert!(!single.has_previous());
        assert!(!single.has_next());
    }
}
