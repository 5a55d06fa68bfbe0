use scraper::ElementRef;
use tracing::trace;

use crate::models::DeveloperContact;
use crate::parser::schema::{meta, ContactLink, MetaField};
use crate::parser::transforms::{clean_href, trim_text};

/// Fields read from the label/value panel of the details page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetaInfo {
    pub updated: String,
    pub size: String,
    pub installs: String,
    pub version: String,
    pub requires_android: String,
    pub content_rating: String,
    pub contact: DeveloperContact,
}

/// Routes every `.meta-info` block by its label. Unknown labels are skipped.
pub fn extract(root: ElementRef<'_>) -> MetaInfo {
    let mut info = MetaInfo::default();

    for block in meta::BLOCK.all(root) {
        let label = meta::LABEL
            .first_value(block)
            .map(|t| trim_text(&t))
            .unwrap_or_default();

        let Some(field) = MetaField::from_label(&label) else {
            trace!("ignoring meta-info label {:?}", label);
            continue;
        };

        let slot = match field {
            MetaField::Updated => &mut info.updated,
            MetaField::Size => &mut info.size,
            MetaField::Installs => &mut info.installs,
            MetaField::CurrentVersion => &mut info.version,
            MetaField::RequiresAndroid => &mut info.requires_android,
            MetaField::ContentRating => &mut info.content_rating,
            MetaField::ContactDeveloper => {
                contact(block, &mut info.contact);
                continue;
            }
        };
        *slot = value(block);
    }

    info
}

fn value(block: ElementRef<'_>) -> String {
    meta::VALUE
        .first_value(block)
        .map(|t| trim_text(&t))
        .unwrap_or_default()
}

/// Dispatches on each link's visible text; only recognised links write.
fn contact(block: ElementRef<'_>, out: &mut DeveloperContact) {
    for link in meta::LINK.all(block) {
        let text: String = link.text().collect();
        let href = meta::LINK.read(link);
        match ContactLink::from_label(text.trim()) {
            Some(ContactLink::Website) => out.website = clean_href(href.as_deref()),
            Some(ContactLink::Email) => out.email = clean_href(href.as_deref()),
            None => trace!("ignoring contact link {:?}", text.trim()),
        }
    }
}
