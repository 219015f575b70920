//! Built-in publisher catalogs
//!
//! Each publisher storefront has its own theme, books and announcements.

use crate::types::{
    Announcement, AnnouncementKind, Book, Palette, Price, Theme, ThemeColors,
};

/// A publisher storefront
#[derive(Debug, Clone)]
pub struct Publisher {
    pub theme: Theme,
    pub books: Vec<Book>,
    pub announcements: Vec<Announcement>,
}

impl Publisher {
    pub fn key(&self) -> &'static str {
        self.theme.key
    }

    pub fn book(&self, id: &str) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }

    /// The first free book, granted to every reader of this publisher
    pub fn starter_book(&self) -> Option<&Book> {
        self.books.iter().find(|b| b.effective_price().is_free())
    }

    pub fn announcement(&self, id: &str) -> Option<&Announcement> {
        self.announcements.iter().find(|a| a.id == id)
    }

    /// Catalog book an announcement's call to action points at
    pub fn cta_book(&self, announcement: &Announcement) -> Option<&Book> {
        self.book(&announcement.cta_link)
    }
}

/// All publisher storefronts
#[derive(Debug, Clone)]
pub struct Catalog {
    publishers: Vec<Publisher>,
}

impl Catalog {
    pub fn new(publishers: Vec<Publisher>) -> Self {
        Self { publishers }
    }

    /// Lumina Press, Blueleaf Books and Sunstone Publishing
    pub fn builtin() -> Self {
        Self::new(vec![lumina_press(), blueleaf_books(), sunstone_publishing()])
    }

    pub fn publisher(&self, key: &str) -> Option<&Publisher> {
        self.publishers.iter().find(|p| p.key() == key)
    }

    pub fn publishers(&self) -> &[Publisher] {
        &self.publishers
    }

    pub fn themes(&self) -> impl Iterator<Item = &Theme> {
        self.publishers.iter().map(|p| &p.theme)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Opening of *Moby Dick*, with one illustration
const MOBY_DICK: &str = "Chapter 1: Loomings\n\nCall me Ishmael. Some years ago—never mind how long \
precisely—having little or no money in my purse, and nothing particular to interest \
me on shore, I thought I would sail about a little and see the watery part of the \
world. It is a way I have of driving off the spleen and regulating the circulation. \
Whenever I find myself growing grim about the mouth; whenever it is a damp, drizzly \
November in my soul; whenever I find myself involuntarily pausing before coffin \
warehouses, and bringing up the rear of every funeral I meet; and especially \
whenever my hypos get such an upper hand of me, that it requires a strong moral \
principle to prevent me from deliberately stepping into the street, and methodically \
knocking people’s hats off—then, I account it high time to get to sea as soon as I \
can. This is my substitute for pistol and \
ball.\n\n[IMAGE:https://picsum.photos/seed/mobydick-ship/800/500]\n\nWith a \
philosophical flourish Cato throws himself upon his sword; I quietly take to the \
ship. There is nothing surprising in this. If they but knew it, almost all men in \
their degree, some time or other, cherish very nearly the same feelings towards the \
ocean with me.";

/// Prologue of *Echoes of Starlight*, with one illustration
const ECHOES_OF_STARLIGHT: &str = "Prologue\n\nFrom the observation deck of the Starship Voyager, the universe was a \
tapestry of infinite black velvet, sprinkled with the diamond dust of distant \
galaxies. Commander Eva Rostova gazed at the swirling nebula of Cygnus X-1, her \
reflection a faint ghost on the reinforced plasteel viewport. Twenty years. Twenty \
years she had been out here, in the deep void, chasing echoes. The 'Echoes,' as her \
crew called them, were faint, ghost-like signals that defied all known physics. They \
were patterns without a source, messages without a sender. Some believed they were \
the dying breaths of a long-dead civilization. Others, more fancifully, called them \
the whispers of \
God.\n\n[IMAGE:https://picsum.photos/seed/echoesstarlight-art1/800/500]\n\nEva was a \
scientist. She dealt in data, in proof, in the tangible. But even she couldn't deny \
the haunting beauty of the signals. They sang a melancholic song of cosmic \
loneliness, a song that resonated with a place deep inside her she rarely \
acknowledged. Her mission was simple: find the source. But the journey had been \
anything but. They had navigated asteroid fields that danced like angry hornets, \
weathered solar flares that threatened to peel their ship apart, and stared into the \
maddening abyss of black holes. Through it all, the Echoes were their constant \
companion, a siren's call leading them deeper into the unknown. Tonight, the signals \
were stronger than ever. The ship's chief science officer, a young, brilliant man \
named Jax, confirmed her thoughts. \"Commander,\" his voice crackled over the \
intercom, \"the resonance frequency is off the charts. We're close. Whatever 'it' \
is, it's just beyond this nebula.\" Eva took a deep breath, the recycled air tasting \
of ozone and anticipation. \"Take us in, Mr. Jax,\" she said, her voice steady \
despite the tremor in her hands. \"Let's see who's been singing to us all this \
time.\"";

/// Filler chapter appended to every synopsis-only catalog book
const SAMPLE_CHAPTER: &str = "\n\nChapter 2: The Journey Begins\n\nLorem ipsum dolor sit amet, consectetur \
adipiscing elit. Sed non risus. Suspendisse lectus tortor, dignissim sit amet, \
adipiscing nec, ultricies sed, dolor. Cras elementum ultrices diam. Maecenas ligula \
massa, varius a, semper congue, euismod non, mi. Proin porttitor, orci nec nonummy \
molestie, enim est eleifend mi, non fermentum diam nisl sit amet erat. Duis semper. \
Duis arcu massa, scelerisque vitae, consequat in, pretium a, enim. Pellentesque \
congue. Ut in risus volutpat libero pharetra tempor. Cras vestibulum bibendum augue. \
Praesent egestas leo in pede. Praesent blandit odio eu enim. Pellentesque sed dui ut \
augue blandit sodales. Vestibulum ante ipsum primis in faucibus orci luctus et \
ultrices posuere cubilia Curae; Aliquam nibh. Mauris ac mauris sed pede pellentesque \
fermentum. Maecenas adipiscing ante non diam. Sorbi in justo.";

fn cover(seed: &str) -> String {
    format!("https://picsum.photos/seed/{}/400/600", seed)
}

/// Priced plain-text catalog book
fn catalog_book(id: &str, title: &str, author: &str, cents: u64, seed: &str, content: &str) -> Book {
    Book::text(id, title, author, content)
        .with_price(Price::from_cents(cents))
        .with_cover(cover(seed))
}

/// Catalog book with a synopsis followed by the sample chapter
fn synopsis_book(id: &str, title: &str, author: &str, cents: u64, seed: &str, synopsis: &str) -> Book {
    let content = format!("{}\n\nChapter 2: The Journey Begins\n\n{}", synopsis, SAMPLE_CHAPTER);
    catalog_book(id, title, author, cents, seed, &content)
}

fn lumina_press() -> Publisher {
    Publisher {
        theme: Theme {
            key: "lumina",
            app_name: "Lumina Press",
            logo: "lightbulb",
            colors: ThemeColors {
                primary: Palette([
                    "#fffbeb", "#fef3c7", "#fde68a", "#fcd34d", "#fbbf24", "#f59e0b", "#d97706",
                    "#b45309", "#92400e", "#78350f", "#451a03",
                ]),
                secondary: Palette([
                    "#f8fafc", "#f1f5f9", "#e2e8f0", "#cbd5e1", "#94a3b8", "#64748b", "#475569",
                    "#334155", "#1e293b", "#0f172a", "#020617",
                ]),
            },
        },
        books: vec![
            catalog_book("pub-1", "Moby Dick", "Herman Melville", 0, "mobydick", MOBY_DICK),
            catalog_book(
                "pub-2",
                "Echoes of Starlight",
                "Kaelen Rourke",
                999,
                "echoesstarlight",
                ECHOES_OF_STARLIGHT,
            ),
            synopsis_book(
                "pub-3",
                "City of Brass and Fire",
                "Nadia Al-Farsi",
                999,
                "citybrass",
                "A sprawling epic set in a magical city where djinn and humans coexist in a \
                 fragile peace. But a dark power is rising, threatening to shatter their world \
                 into chaos and flame.",
            ),
            synopsis_book(
                "pub-4",
                "The Last Timekeeper",
                "Simon Glass",
                799,
                "timekeeper",
                "In a world where time can be bottled and sold, the last true Timekeeper must \
                 protect the Great Clock from a corporation that wants to control the past, \
                 present, and future.",
            ),
        ],
        announcements: vec![
            Announcement {
                id: "announcement-1".to_string(),
                kind: AnnouncementKind::Popup,
                title: "New Release: \"City of Brass and Fire\"".to_string(),
                message: "Nadia Al-Farsi's sprawling epic is now available! Dive into a world \
                          of djinn, magic, and a fragile peace threatened by a rising dark power. \
                          Add it to your library today."
                    .to_string(),
                image_url: Some("https://picsum.photos/seed/citybrass/800/400".to_string()),
                cta_text: "Add to My Library".to_string(),
                cta_link: "pub-3".to_string(),
                requires_push: false,
            },
            Announcement {
                id: "announcement-2".to_string(),
                kind: AnnouncementKind::Notification,
                title: "Meet the Author: Kaelen Rourke".to_string(),
                message: "Join us for a live Q&A with the author of \"Echoes of Starlight\" this \
                          Friday. Don't miss out!"
                    .to_string(),
                image_url: None,
                cta_text: "Learn More".to_string(),
                cta_link: "event-1".to_string(),
                requires_push: false,
            },
            Announcement {
                id: "announcement-3".to_string(),
                kind: AnnouncementKind::Notification,
                title: "Limited Time Offer!".to_string(),
                message: "Get \"The Last Timekeeper\" for 50% off this weekend only. Don't miss \
                          out!"
                    .to_string(),
                image_url: None,
                cta_text: "Claim Offer".to_string(),
                cta_link: "pub-4".to_string(),
                requires_push: true,
            },
        ],
    }
}

fn blueleaf_books() -> Publisher {
    Publisher {
        theme: Theme {
            key: "blueleaf",
            app_name: "Blueleaf Books",
            logo: "feather",
            colors: ThemeColors {
                primary: Palette([
                    "#f0fdfa", "#ccfbf1", "#99f6e4", "#5eead4", "#2dd4bf", "#14b8a6", "#0d9488",
                    "#0f766e", "#115e59", "#134e4a", "#042f2e",
                ]),
                secondary: Palette([
                    "#f7fee7", "#ecfccb", "#d9f99d", "#bef264", "#a3e635", "#84cc16", "#65a30d",
                    "#4d7c0f", "#3f6212", "#365314", "#1a2e05",
                ]),
            },
        },
        books: vec![
            synopsis_book(
                "bl-1",
                "The Silent Grove",
                "Elara Vance",
                0,
                "silentgrove",
                "In a forest where trees whisper secrets, a young druid must uncover a plot \
                 that threatens to silence the woods forever.",
            ),
            synopsis_book(
                "bl-2",
                "River of a Thousand Faces",
                "Chen Yue",
                899,
                "riverfaces",
                "A mystical river grants visions to those who drink from it. A traveling monk \
                 seeks its source, hoping to find enlightenment, but discovers the river has a \
                 will of its own.",
            ),
            synopsis_book(
                "bl-3",
                "The Thorn Witch",
                "Briar Rosewood",
                999,
                "thornwitch",
                "A reclusive witch, protector of a cursed castle, finds her solitude shattered \
                 by a knight who believes she holds the key to his redemption.",
            ),
        ],
        announcements: vec![Announcement {
            id: "announcement-bl-1".to_string(),
            kind: AnnouncementKind::Popup,
            title: "Discover \"The Thorn Witch\"".to_string(),
            message: "Briar Rosewood's new dark fantasy is here. Explore a cursed castle and a \
                      love that blooms like a defiant rose. Get your copy now."
                .to_string(),
            image_url: Some("https://picsum.photos/seed/thornwitch_announce/800/400".to_string()),
            cta_text: "Explore the Tale".to_string(),
            cta_link: "bl-3".to_string(),
            requires_push: false,
        }],
    }
}

fn sunstone_publishing() -> Publisher {
    Publisher {
        theme: Theme {
            key: "sunstone",
            app_name: "Sunstone Publishing",
            logo: "sun",
            colors: ThemeColors {
                primary: Palette([
                    "#fff1f2", "#ffe4e6", "#fecdd3", "#fda4af", "#fb7185", "#f43f5e", "#e11d48",
                    "#be123c", "#9f1239", "#881337", "#4c0519",
                ]),
                secondary: Palette([
                    "#fff7ed", "#ffedd5", "#fed7aa", "#fdba74", "#fb923c", "#f97316", "#ea580c",
                    "#c2410c", "#9a3412", "#7c2d12", "#431407",
                ]),
            },
        },
        books: vec![
            synopsis_book(
                "ss-1",
                "Chronicles of the Sunstone",
                "Aidan Sol",
                0,
                "sunstonechronicles",
                "A legendary gem, the Sunstone, is stolen from a desert kingdom, plunging it \
                 into eternal twilight. A young warrior must retrieve it from a city of shadows.",
            ),
            synopsis_book(
                "ss-2",
                "Crimson Peak",
                "Rory Scarlett",
                1299,
                "crimsonpeak",
                "On a volcanic island, an ancient fire god is reawakening. A volcanologist and \
                 a local shaman must team up to appease the deity before their home is consumed \
                 by lava.",
            ),
            synopsis_book(
                "ss-3",
                "The Phoenix Rider",
                "Ignatius Drake",
                1099,
                "phoenixrider",
                "Only one rider can bond with the legendary phoenix. The fate of the empire \
                 rests on a young orphan who must prove her worth in a deadly tournament.",
            ),
        ],
        announcements: vec![Announcement {
            id: "announcement-ss-1".to_string(),
            kind: AnnouncementKind::Notification,
            title: "The Phoenix Rider has Arrived!".to_string(),
            message: "The most anticipated fantasy novel of the year is finally here. Join the \
                      epic journey today!"
                .to_string(),
            image_url: None,
            cta_text: "Buy Now".to_string(),
            cta_link: "ss-3".to_string(),
            requires_push: false,
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::parse;
    use crate::types::Segment;

    #[test]
    fn test_builtin_publishers() {
        let catalog = Catalog::builtin();
        let keys: Vec<_> = catalog.publishers().iter().map(Publisher::key).collect();
        assert_eq!(keys, vec!["lumina", "blueleaf", "sunstone"]);
        assert!(catalog.publisher("unknown").is_none());
    }

    #[test]
    fn test_starter_books() {
        let catalog = Catalog::builtin();
        let starters: Vec<_> = catalog
            .publishers()
            .iter()
            .filter_map(|p| p.starter_book().map(|b| b.id.as_str()))
            .collect();
        assert_eq!(starters, vec!["pub-1", "bl-1", "ss-1"]);
    }

    #[test]
    fn test_sample_books_carry_an_illustration() {
        let catalog = Catalog::builtin();
        let lumina = catalog.publisher("lumina").unwrap();
        for id in ["pub-1", "pub-2"] {
            let text = lumina.book(id).unwrap().plain_text().unwrap();
            let images = parse(text).iter().filter(|s| s.is_image()).count();
            assert_eq!(images, 1, "{} should have one illustration", id);
        }
    }

    #[test]
    fn test_synopsis_books_get_sample_chapter() {
        let catalog = Catalog::builtin();
        let book = catalog.publisher("sunstone").unwrap().book("ss-2").unwrap();
        let text = book.plain_text().unwrap();
        assert!(text.starts_with("On a volcanic island"));
        assert!(text.contains("\n\nChapter 2: The Journey Begins\n\nLorem ipsum"));
        assert_eq!(parse(text), vec![Segment::text(text)]);
    }

    #[test]
    fn test_cta_resolution() {
        let catalog = Catalog::builtin();
        let lumina = catalog.publisher("lumina").unwrap();

        let popup = lumina.announcement("announcement-1").unwrap();
        assert_eq!(lumina.cta_book(popup).unwrap().id, "pub-3");

        let event = lumina.announcement("announcement-2").unwrap();
        assert!(lumina.cta_book(event).is_none());
    }
}
