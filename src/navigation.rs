//! Sections, the mobile menu and project-card hover state.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Section {
    Home,
    About,
    Skills,
    Projects,
    Contact,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Home,
        Section::About,
        Section::Skills,
        Section::Projects,
        Section::Contact,
    ];

    pub fn anchor(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::About => "about",
            Self::Skills => "skills",
            Self::Projects => "projects",
            Self::Contact => "contact",
        }
    }

    pub fn href(self) -> String {
        format!("#{}", self.anchor())
    }

    pub fn index(self) -> usize {
        match self {
            Self::Home => 0,
            Self::About => 1,
            Self::Skills => 2,
            Self::Projects => 3,
            Self::Contact => 4,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MenuState {
    open: bool,
}

impl MenuState {
    pub fn is_open(self) -> bool {
        self.open
    }

    pub fn toggled(self) -> Self {
        Self { open: !self.open }
    }

    pub fn closed(self) -> Self {
        Self { open: false }
    }
}

/// Anything that can have its `overflow` style switched; the document body
/// in the browser.
pub trait OverflowTarget {
    fn set_overflow(&self, value: &str);
}

/// Hides body overflow while alive and always restores it when dropped,
/// including when the page unmounts with the menu still open.
pub struct ScrollLock<T: OverflowTarget> {
    target: T,
}

impl<T: OverflowTarget> ScrollLock<T> {
    pub fn engage(target: T) -> Self {
        target.set_overflow("hidden");
        Self { target }
    }
}

impl<T: OverflowTarget> Drop for ScrollLock<T> {
    fn drop(&mut self) {
        self.target.set_overflow("");
    }
}

/// Which project card, if any, is under the pointer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProjectHover {
    active: Option<usize>,
}

impl ProjectHover {
    pub fn entered(self, index: usize) -> Self {
        Self {
            active: Some(index),
        }
    }

    /// A late leave from a card that is no longer active changes nothing.
    pub fn left(self, index: usize) -> Self {
        if self.active == Some(index) {
            Self { active: None }
        } else {
            self
        }
    }

    pub fn is_active(self, index: usize) -> bool {
        self.active == Some(index)
    }

    pub fn active(self) -> Option<usize> {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct FakeBody(Rc<RefCell<String>>);

    impl OverflowTarget for FakeBody {
        fn set_overflow(&self, value: &str) {
            *self.0.borrow_mut() = value.to_string();
        }
    }

    #[test]
    fn sections_have_distinct_anchors_in_page_order() {
        let anchors: Vec<&str> = Section::ALL.iter().map(|section| section.anchor()).collect();
        assert_eq!(anchors, ["home", "about", "skills", "projects", "contact"]);

        for (position, section) in Section::ALL.into_iter().enumerate() {
            assert_eq!(section.index(), position);
            assert_eq!(section.href(), format!("#{}", section.anchor()));
        }
    }

    #[test]
    fn menu_toggles_and_closes() {
        let menu = MenuState::default();
        assert!(!menu.is_open());

        let opened = menu.toggled();
        assert!(opened.is_open());
        assert!(!opened.toggled().is_open());
        assert!(!opened.closed().is_open());
        assert!(!menu.closed().is_open());
    }

    #[test]
    fn scroll_lock_restores_on_drop() {
        let body = FakeBody::default();

        let lock = ScrollLock::engage(body.clone());
        assert_eq!(body.0.borrow().as_str(), "hidden");

        drop(lock);
        assert_eq!(body.0.borrow().as_str(), "");
    }

    #[test]
    fn scroll_lock_restores_when_owner_goes_away_while_open() {
        let body = FakeBody::default();

        {
            let menu = MenuState::default().toggled();
            let _lock = menu.is_open().then(|| ScrollLock::engage(body.clone()));
            assert_eq!(body.0.borrow().as_str(), "hidden");
        }

        assert_eq!(body.0.borrow().as_str(), "");
    }

    #[test]
    fn hover_is_mutually_exclusive() {
        let hover = ProjectHover::default().entered(0);
        assert!(hover.is_active(0));

        let hover = hover.entered(1);
        assert!(hover.is_active(1));
        assert!(!hover.is_active(0));

        let hover = hover.left(0);
        assert_eq!(hover.active(), Some(1));

        let hover = hover.left(1);
        assert_eq!(hover.active(), None);
    }
}
