//! Closed element categories.
//!
//! Every element gets its [`Tag`] once, when it is created. The category
//! predicates below are exhaustive matches over that enum, so adding a tag
//! forces a decision in every table at compile time.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tag {
    A,
    Abbr,
    Address,
    Area,
    Article,
    Aside,
    Audio,
    B,
    Base,
    Bdi,
    Bdo,
    Blockquote,
    Body,
    Br,
    Button,
    Canvas,
    Caption,
    Cite,
    Code,
    Col,
    Colgroup,
    Command,
    Data,
    Dd,
    Del,
    Dfn,
    Div,
    Dl,
    Dt,
    Em,
    Embed,
    Fieldset,
    Figcaption,
    Figure,
    Footer,
    Form,
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    Head,
    Header,
    Hgroup,
    Hr,
    Html,
    I,
    Img,
    Input,
    Ins,
    Kbd,
    Keygen,
    Label,
    Li,
    Link,
    Main,
    Mark,
    Menu,
    Meta,
    Nav,
    Noscript,
    Object,
    Ol,
    Output,
    P,
    Param,
    Pre,
    Q,
    Rp,
    Rt,
    Ruby,
    S,
    Samp,
    Script,
    Section,
    Select,
    Small,
    Source,
    Span,
    Strong,
    Style,
    Sub,
    Sup,
    Table,
    Tbody,
    Td,
    Template,
    Textarea,
    Tfoot,
    Th,
    Thead,
    Time,
    Title,
    Tr,
    Track,
    U,
    Ul,
    Var,
    Video,
    Wbr,
    /// Any name outside the tables; custom elements land here.
    Other,
}

impl Tag {
    /// Map a tag name to its variant. Matching is ASCII case-insensitive.
    pub fn from_name(name: &str) -> Tag {
        let lower = name.to_ascii_lowercase();
        match lower.as_str() {
            "a" => Tag::A,
            "abbr" => Tag::Abbr,
            "address" => Tag::Address,
            "area" => Tag::Area,
            "article" => Tag::Article,
            "aside" => Tag::Aside,
            "audio" => Tag::Audio,
            "b" => Tag::B,
            "base" => Tag::Base,
            "bdi" => Tag::Bdi,
            "bdo" => Tag::Bdo,
            "blockquote" => Tag::Blockquote,
            "body" => Tag::Body,
            "br" => Tag::Br,
            "button" => Tag::Button,
            "canvas" => Tag::Canvas,
            "caption" => Tag::Caption,
            "cite" => Tag::Cite,
            "code" => Tag::Code,
            "col" => Tag::Col,
            "colgroup" => Tag::Colgroup,
            "command" => Tag::Command,
            "data" => Tag::Data,
            "dd" => Tag::Dd,
            "del" => Tag::Del,
            "dfn" => Tag::Dfn,
            "div" => Tag::Div,
            "dl" => Tag::Dl,
            "dt" => Tag::Dt,
            "em" => Tag::Em,
            "embed" => Tag::Embed,
            "fieldset" => Tag::Fieldset,
            "figcaption" => Tag::Figcaption,
            "figure" => Tag::Figure,
            "footer" => Tag::Footer,
            "form" => Tag::Form,
            "h1" => Tag::H1,
            "h2" => Tag::H2,
            "h3" => Tag::H3,
            "h4" => Tag::H4,
            "h5" => Tag::H5,
            "h6" => Tag::H6,
            "head" => Tag::Head,
            "header" => Tag::Header,
            "hgroup" => Tag::Hgroup,
            "hr" => Tag::Hr,
            "html" => Tag::Html,
            "i" => Tag::I,
            "img" => Tag::Img,
            "input" => Tag::Input,
            "ins" => Tag::Ins,
            "kbd" => Tag::Kbd,
            "keygen" => Tag::Keygen,
            "label" => Tag::Label,
            "li" => Tag::Li,
            "link" => Tag::Link,
            "main" => Tag::Main,
            "mark" => Tag::Mark,
            "menu" => Tag::Menu,
            "meta" => Tag::Meta,
            "nav" => Tag::Nav,
            "noscript" => Tag::Noscript,
            "object" => Tag::Object,
            "ol" => Tag::Ol,
            "output" => Tag::Output,
            "p" => Tag::P,
            "param" => Tag::Param,
            "pre" => Tag::Pre,
            "q" => Tag::Q,
            "rp" => Tag::Rp,
            "rt" => Tag::Rt,
            "ruby" => Tag::Ruby,
            "s" => Tag::S,
            "samp" => Tag::Samp,
            "script" => Tag::Script,
            "section" => Tag::Section,
            "select" => Tag::Select,
            "small" => Tag::Small,
            "source" => Tag::Source,
            "span" => Tag::Span,
            "strong" => Tag::Strong,
            "style" => Tag::Style,
            "sub" => Tag::Sub,
            "sup" => Tag::Sup,
            "table" => Tag::Table,
            "tbody" => Tag::Tbody,
            "td" => Tag::Td,
            "template" => Tag::Template,
            "textarea" => Tag::Textarea,
            "tfoot" => Tag::Tfoot,
            "th" => Tag::Th,
            "thead" => Tag::Thead,
            "time" => Tag::Time,
            "title" => Tag::Title,
            "tr" => Tag::Tr,
            "track" => Tag::Track,
            "u" => Tag::U,
            "ul" => Tag::Ul,
            "var" => Tag::Var,
            "video" => Tag::Video,
            "wbr" => Tag::Wbr,
            _ => Tag::Other,
        }
    }

    /// Elements that never have content.
    pub fn is_void(self) -> bool {
        matches!(
            self,
            Tag::Area
                | Tag::Base
                | Tag::Br
                | Tag::Col
                | Tag::Command
                | Tag::Embed
                | Tag::Hr
                | Tag::Img
                | Tag::Input
                | Tag::Keygen
                | Tag::Link
                | Tag::Meta
                | Tag::Param
                | Tag::Source
                | Tag::Track
                | Tag::Wbr
        )
    }

    pub fn is_block_level(self) -> bool {
        matches!(
            self,
            Tag::Address
                | Tag::Article
                | Tag::Aside
                | Tag::Audio
                | Tag::Blockquote
                | Tag::Canvas
                | Tag::Dd
                | Tag::Div
                | Tag::Dl
                | Tag::Fieldset
                | Tag::Figcaption
                | Tag::Figure
                | Tag::Footer
                | Tag::Form
                | Tag::H1
                | Tag::H2
                | Tag::H3
                | Tag::H4
                | Tag::H5
                | Tag::H6
                | Tag::Header
                | Tag::Hgroup
                | Tag::Hr
                | Tag::Noscript
                | Tag::Ol
                | Tag::Output
                | Tag::P
                | Tag::Pre
                | Tag::Section
                | Tag::Table
                | Tag::Tfoot
                | Tag::Ul
                | Tag::Video
        )
    }

    pub fn is_text_level_semantic(self) -> bool {
        matches!(
            self,
            Tag::A
                | Tag::Abbr
                | Tag::B
                | Tag::Bdi
                | Tag::Bdo
                | Tag::Br
                | Tag::Cite
                | Tag::Code
                | Tag::Data
                | Tag::Dfn
                | Tag::Em
                | Tag::I
                | Tag::Kbd
                | Tag::Mark
                | Tag::Q
                | Tag::Rp
                | Tag::Rt
                | Tag::Ruby
                | Tag::S
                | Tag::Samp
                | Tag::Small
                | Tag::Span
                | Tag::Strong
                | Tag::Sub
                | Tag::Sup
                | Tag::Time
                | Tag::U
                | Tag::Var
                | Tag::Wbr
        )
    }

    pub fn is_list_container(self) -> bool {
        matches!(self, Tag::Ol | Tag::Ul | Tag::Dl | Tag::Menu)
    }

    pub fn is_list_item(self) -> bool {
        matches!(self, Tag::Li | Tag::Dt | Tag::Dd)
    }

    /// Containers whose children are constrained, so they cannot be unwrapped.
    pub fn is_group_container(self) -> bool {
        matches!(
            self,
            Tag::Fieldset
                | Tag::Object
                | Tag::Figure
                | Tag::Audio
                | Tag::Select
                | Tag::Colgroup
                | Tag::Hgroup
                | Tag::Table
                | Tag::Tbody
                | Tag::Tr
                | Tag::Ol
                | Tag::Ul
                | Tag::Dl
                | Tag::Menu
        )
    }

    /// The grouping containers this element may appear under.
    ///
    /// Empty for elements that are not grouped.
    pub fn grouping_parents(self) -> &'static [Tag] {
        match self {
            Tag::Li => &[Tag::Ol, Tag::Ul, Tag::Dl],
            Tag::Dt | Tag::Dd => &[Tag::Dl],
            Tag::Tbody => &[Tag::Table],
            Tag::Tr | Tag::Th => &[Tag::Table, Tag::Tbody],
            Tag::Td => &[Tag::Tr, Tag::Th],
            _ => &[],
        }
    }

    /// Grouped elements render even when empty.
    #[inline]
    pub fn is_grouped(self) -> bool {
        !self.grouping_parents().is_empty()
    }

    /// Voids that occupy a visible spot on a line.
    pub fn is_line_breaking_void(self) -> bool {
        matches!(self, Tag::Br | Tag::Hr | Tag::Img)
    }

    /// Elements whose content is never displayed.
    pub fn is_non_rendering(self) -> bool {
        matches!(
            self,
            Tag::Head
                | Tag::Style
                | Tag::Script
                | Tag::Title
                | Tag::Meta
                | Tag::Link
                | Tag::Base
                | Tag::Template
        )
    }

    pub fn is_heading(self) -> bool {
        matches!(
            self,
            Tag::H1 | Tag::H2 | Tag::H3 | Tag::H4 | Tag::H5 | Tag::H6
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_case_insensitive() {
        assert_eq!(Tag::from_name("BR"), Tag::Br);
        assert_eq!(Tag::from_name("Li"), Tag::Li);
        assert_eq!(Tag::from_name("my-widget"), Tag::Other);
    }

    #[test]
    fn br_is_void_and_text_level() {
        assert!(Tag::Br.is_void());
        assert!(Tag::Br.is_text_level_semantic());
        assert!(Tag::Br.is_line_breaking_void());
        assert!(!Tag::Br.is_block_level());
    }

    #[test]
    fn lists_group_their_items() {
        assert!(Tag::Ul.is_list_container());
        assert!(Tag::Ul.is_group_container());
        assert!(Tag::Li.is_list_item());
        assert!(Tag::Li.is_grouped());
        assert_eq!(Tag::Li.grouping_parents(), &[Tag::Ol, Tag::Ul, Tag::Dl]);
        assert!(!Tag::P.is_grouped());
    }

    #[test]
    fn table_cells_are_grouped() {
        assert!(Tag::Td.is_grouped());
        assert!(Tag::Tr.is_grouped());
        assert!(Tag::Table.is_group_container());
        assert!(!Tag::Table.is_grouped());
    }
}
