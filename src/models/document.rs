use chrono::NaiveDate;
use strum::{Display, EnumIter};

/// The searchable text fields of a [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Field {
    Title,
    Description,
}

/// One feed item, as handed over by whatever parsed the feed.
///
/// A document is a plain immutable value. The publication date is
/// optional only so that an item with an unparseable date can still be
/// represented. Such a document is refused at indexing time.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Document {
    title: String,
    description: String,
    pub_date: Option<NaiveDate>,
}

impl Document {
    /// A complete, indexable document.
    ///
    /// Example:
    /// ```
    /// use newsdex::prelude::*;
    /// use chrono::NaiveDate;
    ///
    /// let d = Document::new(
    ///     "Kim visits Korea",
    ///     "A state visit",
    ///     NaiveDate::from_ymd_opt(2011, 12, 18).unwrap(),
    /// );
    /// assert_eq!(d.title(), "Kim visits Korea");
    /// ```
    pub fn new<T, D>(title: T, description: D, pub_date: NaiveDate) -> Self
    where
        T: Into<String>,
        D: Into<String>,
    {
        Self {
            title: title.into(),
            description: description.into(),
            pub_date: Some(pub_date),
        }
    }

    /// A document without publication date. Indexing it will fail.
    pub fn undated<T, D>(title: T, description: D) -> Self
    where
        T: Into<String>,
        D: Into<String>,
    {
        Self {
            title: title.into(),
            description: description.into(),
            pub_date: None,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn pub_date(&self) -> Option<NaiveDate> {
        self.pub_date
    }

    /// The text of the given field
    pub fn text(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.title,
            Field::Description => &self.description,
        }
    }
}

impl<T, D> From<(T, D, NaiveDate)> for Document
where
    T: Into<String>,
    D: Into<String>,
{
    fn from((title, description, pub_date): (T, D, NaiveDate)) -> Self {
        Self::new(title, description, pub_date)
    }
}
