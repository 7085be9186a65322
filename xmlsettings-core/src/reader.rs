//! Schema-driven deserialization.
//!
//! Recursive descent over the `quick-xml` event stream, matched directly
//! against the schema tree. Unknown elements are fatal; unknown or
//! setterless attributes are fatal unless the schema's discard options say
//! otherwise. The two termination flags stop the parse cleanly: the signal
//! unwinds through the descent as an ordinary outcome and the whole call
//! reports success with a partially populated host, which is what makes
//! "sniffing" a file with an intentionally incomplete schema possible.

use std::rc::Rc;

use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};

use crate::element::ElementNode;
use crate::error::ReadError;
use crate::repeat::RepeatItem;
use crate::schema::{ElementId, SettingsSchema};

/// How a subtree's parse ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    /// The subtree was read to its end tag.
    Completed,
    /// A termination flag fired; the whole parse stops here, successfully.
    Terminated,
}

/// Populates `host` from an XML document described by `schema`.
///
/// An empty document is not an error; neither is a parse cut short by a
/// termination flag — the host simply keeps whatever was read up to that
/// point.
///
/// # Errors
/// Returns `ReadError` on malformed XML, a root element that does not match
/// the schema, an element with no matching schema child, or an attribute
/// the schema's options do not allow to be discarded.
pub fn deserialize<T, P>(
    schema: &SettingsSchema<T, P>,
    host: &mut T,
    xml: &str,
) -> Result<(), ReadError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut deserializer = Deserializer { schema, reader };
    deserializer.run(host)
}

struct Deserializer<'s, 'x, T, P> {
    schema: &'s SettingsSchema<T, P>,
    reader: Reader<&'x [u8]>,
}

impl<T, P> Deserializer<'_, '_, T, P> {
    fn run(&mut self, host: &mut T) -> Result<(), ReadError> {
        let root = self.schema.root();
        let root_name = self.schema.node(root).name().to_string();
        let mut buf = Vec::new();

        loop {
            match self.reader.read_event_into(&mut buf)? {
                Event::Start(ref e) => {
                    self.check_root_name(e, &root_name)?;
                    let _ = self.read_element(host, root, None, e, false)?;
                    return Ok(());
                }
                Event::Empty(ref e) => {
                    self.check_root_name(e, &root_name)?;
                    let _ = self.read_element(host, root, None, e, true)?;
                    return Ok(());
                }
                // an empty document is an empty settings file, not an error
                Event::Eof => return Ok(()),
                _ => {}
            }
            buf.clear();
        }
    }

    fn check_root_name(&self, e: &BytesStart<'_>, expected: &str) -> Result<(), ReadError> {
        if e.local_name().as_ref() != expected.as_bytes() {
            let actual = std::str::from_utf8(e.local_name().as_ref())?.to_string();
            return Err(ReadError::root_mismatch(expected, actual));
        }
        Ok(())
    }

    /// Reads one element instance: attributes, then children and text, up to
    /// the matching end tag. `item` is the repeat item in effect for this
    /// element's own setters and its descendants.
    fn read_element(
        &mut self,
        host: &mut T,
        id: ElementId,
        item: Option<&Rc<RepeatItem<P>>>,
        start: &BytesStart<'_>,
        is_empty: bool,
    ) -> Result<Outcome, ReadError> {
        let schema = self.schema;
        let node = schema.node(id);

        self.read_attributes(host, node, item, start)?;

        if node.stops_after_attributes() {
            tracing::debug!(element = node.name(), "parse terminated after attributes");
            return Ok(Outcome::Terminated);
        }
        if is_empty {
            return Ok(Outcome::Completed);
        }

        let mut text = String::new();
        let mut buf = Vec::new();

        loop {
            match self.reader.read_event_into(&mut buf)? {
                Event::Start(ref e) => {
                    if self.read_child(host, id, item, e, false)? == Outcome::Terminated {
                        return Ok(Outcome::Terminated);
                    }
                }
                Event::Empty(ref e) => {
                    if self.read_child(host, id, item, e, true)? == Outcome::Terminated {
                        return Ok(Outcome::Terminated);
                    }
                }
                Event::Text(ref t) => {
                    let raw = std::str::from_utf8(t.as_ref())?;
                    text.push_str(&unescape(raw)?);
                }
                Event::GeneralRef(ref r) => {
                    // references are reported apart from the text around them
                    let raw = std::str::from_utf8(r.as_ref())?;
                    text.push_str(&unescape(&format!("&{raw};"))?);
                }
                Event::CData(ref c) => {
                    text.push_str(std::str::from_utf8(c.as_ref())?);
                }
                Event::End(_) => break,
                Event::Eof => return Err(ReadError::unexpected_eof(node.name())),
                _ => {}
            }
            buf.clear();
        }

        if !text.is_empty() {
            if node.has_setter() {
                node.set_value(host, &text, item.map(Rc::as_ref))?;
            } else if !schema.options().discard_attributes_without_setter {
                return Err(ReadError::element_without_setter(node.name()));
            }
        }

        Ok(Outcome::Completed)
    }

    /// Matches a child tag against the schema, sets up the repeat item for a
    /// repeating child, recurses, and commits afterwards.
    fn read_child(
        &mut self,
        host: &mut T,
        parent_id: ElementId,
        item: Option<&Rc<RepeatItem<P>>>,
        start: &BytesStart<'_>,
        is_empty: bool,
    ) -> Result<Outcome, ReadError> {
        let schema = self.schema;
        let name_bytes = start.local_name().as_ref().to_vec();
        let name = std::str::from_utf8(&name_bytes)?;

        let Some(child_id) = schema.find_child(parent_id, name) else {
            return Err(ReadError::unknown_element(
                name,
                schema.node(parent_id).name(),
            ));
        };
        let child = schema.node(child_id);

        // a repeating child gets a fresh item, chained to the enclosing one;
        // everything else inherits the current item
        let child_item = match child.repeat() {
            Some(binding) => Some(binding.create_item(host, item, child_id)),
            None => item.cloned(),
        };

        let outcome = self.read_element(host, child_id, child_item.as_ref(), start, is_empty)?;
        if outcome == Outcome::Terminated {
            return Ok(Outcome::Terminated);
        }

        // commit strictly after the child's whole subtree, so nested repeats
        // land in the item before the item lands in the host
        if let (Some(binding), Some(child_item)) = (child.repeat(), child_item.as_ref()) {
            binding.commit(host, child_item);
        }

        if child.stops_after_element() {
            tracing::debug!(element = child.name(), "parse terminated after element");
            return Ok(Outcome::Terminated);
        }

        Ok(Outcome::Completed)
    }

    fn read_attributes(
        &self,
        host: &mut T,
        node: &ElementNode<T, P>,
        item: Option<&Rc<RepeatItem<P>>>,
        start: &BytesStart<'_>,
    ) -> Result<(), ReadError> {
        let options = self.schema.options();

        for attribute in start.attributes() {
            let attribute = attribute?;
            let key = std::str::from_utf8(attribute.key.as_ref())?;
            if key == "xmlns" || key.starts_with("xmlns:") {
                continue;
            }

            let local_bytes = attribute.key.local_name().as_ref().to_vec();
            let local = std::str::from_utf8(&local_bytes)?;
            let raw = std::str::from_utf8(&attribute.value)?;
            let value = unescape(raw)?;

            match node.find_attribute(local) {
                Some(declared) => {
                    if declared.has_setter() {
                        declared.set_value(host, &value, item.map(Rc::as_ref))?;
                    } else if !options.discard_attributes_without_setter {
                        return Err(ReadError::attribute_without_setter(node.name(), local));
                    }
                }
                None => {
                    if !options.discard_unknown_attributes {
                        return Err(ReadError::unknown_attribute(local, node.name()));
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::SchemaBuilder;
    use crate::element::{GetValueFn, SetValueFn, getter, setter};
    use crate::error::ValueError;
    use crate::writer::serialize;
    use std::collections::BTreeMap;

    const NS: &str = "http://schemas.example.com/settings/reftest/2020";
    const DECL: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>";

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Nested {
        name: String,
        nested_num_foo: i32,
        nested_strings: Vec<String>,
        strings_cursor: usize,
    }

    #[derive(Debug, Default, Clone, PartialEq)]
    struct RepeatSettings {
        num_foo: i32,
        string_bar: Option<String>,
        strings_bar: Vec<String>,
        map_nested: BTreeMap<String, Nested>,
        strings_cursor: usize,
        nested_cursor: usize,
    }

    /// Closed set of repeat payloads this host uses: a single-string slot
    /// for collection entries, a whole map value for `Nested` items.
    enum Payload {
        Slot(Option<String>),
        Nested(Nested),
    }

    fn slot_getter() -> Option<GetValueFn<RepeatSettings, Payload>> {
        getter(|_s: &RepeatSettings, item: Option<&RepeatItem<Payload>>| {
            item.and_then(|i| match &*i.payload() {
                Payload::Slot(slot) => slot.clone(),
                Payload::Nested(_) => None,
            })
        })
    }

    fn slot_setter() -> Option<SetValueFn<RepeatSettings, Payload>> {
        setter(|_s: &mut RepeatSettings, v, item: Option<&RepeatItem<Payload>>| {
            if let Some(item) = item
                && let Payload::Slot(slot) = &mut *item.payload_mut()
            {
                *slot = Some(v.to_string());
            }
            Ok(())
        })
    }

    fn name_getter() -> Option<GetValueFn<RepeatSettings, Payload>> {
        getter(|_s: &RepeatSettings, item: Option<&RepeatItem<Payload>>| {
            item.and_then(|i| match &*i.payload() {
                Payload::Nested(n) => Some(n.name.clone()),
                Payload::Slot(_) => None,
            })
        })
    }

    fn name_setter() -> Option<SetValueFn<RepeatSettings, Payload>> {
        setter(|_s: &mut RepeatSettings, v, item: Option<&RepeatItem<Payload>>| {
            if let Some(item) = item
                && let Payload::Nested(n) = &mut *item.payload_mut()
            {
                n.name = v.to_string();
            }
            Ok(())
        })
    }

    fn nested_num_getter() -> Option<GetValueFn<RepeatSettings, Payload>> {
        getter(|_s: &RepeatSettings, item: Option<&RepeatItem<Payload>>| {
            item.and_then(|i| match &*i.payload() {
                Payload::Nested(n) => Some(n.nested_num_foo.to_string()),
                Payload::Slot(_) => None,
            })
        })
    }

    fn nested_num_setter() -> Option<SetValueFn<RepeatSettings, Payload>> {
        setter(|_s: &mut RepeatSettings, v, item: Option<&RepeatItem<Payload>>| {
            if let Some(item) = item
                && let Payload::Nested(n) = &mut *item.payload_mut()
            {
                n.nested_num_foo = v.parse().map_err(|e| ValueError::new("NumFoo", v, e))?;
            }
            Ok(())
        })
    }

    fn create_string_slot(s: &mut RepeatSettings, parent: Option<&RepeatItem<Payload>>) -> Payload {
        // write path surfaces the entry the cursor points at; read path gets
        // an empty slot to build into
        match parent {
            None => {
                if s.strings_cursor > 0 {
                    Payload::Slot(Some(s.strings_bar[s.strings_cursor - 1].clone()))
                } else {
                    Payload::Slot(None)
                }
            }
            Some(p) => match &*p.payload() {
                Payload::Nested(n) if n.strings_cursor > 0 => {
                    Payload::Slot(Some(n.nested_strings[n.strings_cursor - 1].clone()))
                }
                _ => Payload::Slot(None),
            },
        }
    }

    fn strings_has_remaining(
        s: &mut RepeatSettings,
        parent: Option<&RepeatItem<Payload>>,
    ) -> bool {
        match parent {
            None => {
                if s.strings_cursor < s.strings_bar.len() {
                    s.strings_cursor += 1;
                    true
                } else {
                    s.strings_cursor = 0;
                    false
                }
            }
            Some(p) => {
                if let Payload::Nested(n) = &mut *p.payload_mut() {
                    if n.strings_cursor < n.nested_strings.len() {
                        n.strings_cursor += 1;
                        true
                    } else {
                        n.strings_cursor = 0;
                        false
                    }
                } else {
                    false
                }
            }
        }
    }

    fn commit_top_string(s: &mut RepeatSettings, item: &RepeatItem<Payload>) {
        if let Payload::Slot(slot) = &mut *item.payload_mut()
            && let Some(v) = slot.take()
        {
            s.strings_bar.push(v);
        }
    }

    fn commit_nested_string(_s: &mut RepeatSettings, item: &RepeatItem<Payload>) {
        let parent = item.parent().expect("nested string item has a parent");
        if let Payload::Slot(slot) = &mut *item.payload_mut()
            && let Some(v) = slot.take()
            && let Payload::Nested(n) = &mut *parent.payload_mut()
        {
            n.nested_strings.push(v);
        }
    }

    fn create_nested(s: &mut RepeatSettings, _parent: Option<&RepeatItem<Payload>>) -> Payload {
        if s.nested_cursor > 0 {
            let nested = s
                .map_nested
                .values()
                .nth(s.nested_cursor - 1)
                .cloned()
                .unwrap_or_default();
            Payload::Nested(nested)
        } else {
            Payload::Nested(Nested::default())
        }
    }

    fn nesteds_has_remaining(
        s: &mut RepeatSettings,
        _parent: Option<&RepeatItem<Payload>>,
    ) -> bool {
        if s.nested_cursor < s.map_nested.len() {
            s.nested_cursor += 1;
            true
        } else {
            s.nested_cursor = 0;
            false
        }
    }

    fn commit_nested(s: &mut RepeatSettings, item: &RepeatItem<Payload>) {
        if let Payload::Nested(n) = &*item.payload() {
            s.map_nested.insert(n.name.clone(), n.clone());
        }
    }

    /// The full reference schema: scalar values, a repeating collection, and
    /// a repeating map whose items carry their own nested collection.
    fn repeating_schema() -> SettingsSchema<RepeatSettings, Payload> {
        SchemaBuilder::<RepeatSettings, Payload>::new("refSettings")
            .default_namespace(NS)
            .add_child_element(
                "NumFoo",
                getter(|s: &RepeatSettings, _| Some(s.num_foo.to_string())),
                setter(|s: &mut RepeatSettings, v, _| {
                    s.num_foo = v.parse().map_err(|e| ValueError::new("NumFoo", v, e))?;
                    Ok(())
                }),
            )
            .add_element(
                "StringBar",
                getter(|s: &RepeatSettings, _| s.string_bar.clone()),
                setter(|s: &mut RepeatSettings, v, _| {
                    s.string_bar = Some(v.to_string());
                    Ok(())
                }),
            )
            .add_element("StringBars", None, None)
            .add_child_element("StringBar", slot_getter(), slot_setter())
            .set_repeating(create_string_slot, strings_has_remaining, commit_top_string)
            .pop()
            .pop()
            .add_child_element("Nesteds", None, None)
            .add_child_element("Nested", None, None)
            .set_repeating(create_nested, nesteds_has_remaining, commit_nested)
            .add_attribute("Name", name_getter(), name_setter())
            .add_child_element("NumFoo", nested_num_getter(), nested_num_setter())
            .add_element("StringBars", None, None)
            .add_child_element("StringBar", slot_getter(), slot_setter())
            .set_repeating(
                create_string_slot,
                strings_has_remaining,
                commit_nested_string,
            )
            .build()
    }

    #[test]
    fn test_read_repeating_map_single_item() {
        let mut settings = RepeatSettings::default();
        let xml = format!(
            "{DECL}<refSettings xmlns=\"{NS}\"><NumFoo>1</NumFoo><StringBar>foo</StringBar>\
             <Nesteds><Nested Name='test'><NumFoo>11</NumFoo></Nested></Nesteds></refSettings>"
        );

        deserialize(&repeating_schema(), &mut settings, &xml).expect("deserialize failed");

        assert_eq!(settings.num_foo, 1);
        assert_eq!(settings.string_bar.as_deref(), Some("foo"));
        assert_eq!(settings.map_nested.len(), 1);
        assert_eq!(settings.map_nested["test"].nested_num_foo, 11);
    }

    #[test]
    fn test_read_repeating_map_two_items() {
        let mut settings = RepeatSettings::default();
        let xml = format!(
            "{DECL}<refSettings xmlns=\"{NS}\"><NumFoo>1</NumFoo><StringBar>foo</StringBar>\
             <Nesteds><Nested Name='test'><NumFoo>11</NumFoo></Nested>\
             <Nested Name='test2'><NumFoo>22</NumFoo></Nested></Nesteds></refSettings>"
        );

        deserialize(&repeating_schema(), &mut settings, &xml).expect("deserialize failed");

        assert_eq!(settings.map_nested.len(), 2);
        assert_eq!(settings.map_nested["test"].nested_num_foo, 11);
        assert_eq!(settings.map_nested["test2"].nested_num_foo, 22);
    }

    #[test]
    fn test_read_simple_collection_preserves_order() {
        let mut settings = RepeatSettings::default();
        let xml = format!(
            "{DECL}<refSettings xmlns=\"{NS}\"><NumFoo>1</NumFoo><StringBar>foo</StringBar>\
             <StringBars><StringBar>One</StringBar><StringBar>Two</StringBar></StringBars>\
             </refSettings>"
        );

        deserialize(&repeating_schema(), &mut settings, &xml).expect("deserialize failed");

        assert_eq!(settings.num_foo, 1);
        assert_eq!(settings.string_bar.as_deref(), Some("foo"));
        assert_eq!(settings.strings_bar, vec!["One", "Two"]);
    }

    #[test]
    fn test_read_nested_repeats() {
        let mut settings = RepeatSettings::default();
        let xml = format!(
            "{DECL}<refSettings xmlns=\"{NS}\">\
             <NumFoo>1</NumFoo>\
             <StringBar>foo</StringBar>\
             <StringBars><StringBar>One</StringBar><StringBar>Two</StringBar></StringBars>\
             <Nesteds>\
             <Nested Name='test'><NumFoo>11</NumFoo>\
             <StringBars><StringBar>One</StringBar><StringBar>Two</StringBar></StringBars>\
             </Nested>\
             <Nested Name='test2'><NumFoo>22</NumFoo>\
             <StringBars><StringBar>2One</StringBar><StringBar>2Two</StringBar></StringBars>\
             </Nested>\
             </Nesteds></refSettings>"
        );

        deserialize(&repeating_schema(), &mut settings, &xml).expect("deserialize failed");

        assert_eq!(settings.strings_bar, vec!["One", "Two"]);
        assert_eq!(settings.map_nested.len(), 2);
        assert_eq!(settings.map_nested["test"].nested_num_foo, 11);
        assert_eq!(settings.map_nested["test"].nested_strings, vec!["One", "Two"]);
        assert_eq!(settings.map_nested["test2"].nested_num_foo, 22);
        assert_eq!(
            settings.map_nested["test2"].nested_strings,
            vec!["2One", "2Two"]
        );
    }

    #[test]
    fn test_read_nested_repeats_second_item_empty() {
        let mut settings = RepeatSettings::default();
        let xml = format!(
            "{DECL}<refSettings xmlns=\"{NS}\">\
             <NumFoo>1</NumFoo>\
             <StringBar>foo</StringBar>\
             <Nesteds>\
             <Nested Name='test'><NumFoo>11</NumFoo>\
             <StringBars><StringBar>One</StringBar><StringBar>Two</StringBar></StringBars>\
             </Nested>\
             <Nested Name='test2'><NumFoo>22</NumFoo></Nested>\
             </Nesteds></refSettings>"
        );

        deserialize(&repeating_schema(), &mut settings, &xml).expect("deserialize failed");

        assert_eq!(settings.map_nested["test"].nested_strings, vec!["One", "Two"]);
        assert_eq!(settings.map_nested["test2"].nested_num_foo, 22);
        assert!(settings.map_nested["test2"].nested_strings.is_empty());
    }

    #[test]
    fn test_round_trip() {
        let mut original = RepeatSettings {
            num_foo: 1,
            string_bar: Some("foo".to_string()),
            strings_bar: vec!["One".to_string(), "Two".to_string()],
            map_nested: BTreeMap::new(),
            strings_cursor: 0,
            nested_cursor: 0,
        };
        original.map_nested.insert(
            "test".to_string(),
            Nested {
                name: "test".to_string(),
                nested_num_foo: 11,
                nested_strings: vec!["One".to_string(), "Two".to_string()],
                strings_cursor: 0,
            },
        );
        original.map_nested.insert(
            "test2".to_string(),
            Nested {
                name: "test2".to_string(),
                nested_num_foo: 22,
                nested_strings: vec!["2One".to_string(), "2Two".to_string()],
                strings_cursor: 0,
            },
        );

        let schema = repeating_schema();
        let xml = serialize(&schema, &mut original).expect("serialize failed");
        let again = serialize(&schema, &mut original).expect("second serialize failed");
        assert_eq!(xml, again);

        let mut read_back = RepeatSettings::default();
        deserialize(&schema, &mut read_back, &xml).expect("deserialize failed");
        assert_eq!(read_back, original);
    }

    #[test]
    fn test_round_trip_keeps_absent_fields_absent() {
        let mut original = RepeatSettings {
            num_foo: 3,
            ..RepeatSettings::default()
        };

        let schema = repeating_schema();
        let xml = serialize(&schema, &mut original).expect("serialize failed");

        let mut read_back = RepeatSettings::default();
        deserialize(&schema, &mut read_back, &xml).expect("deserialize failed");
        assert_eq!(read_back.string_bar, None);
        assert!(read_back.strings_bar.is_empty());
        assert!(read_back.map_nested.is_empty());
        assert_eq!(read_back, original);
    }

    #[derive(Debug, Default)]
    struct SniffSettings {
        num_foo: i32,
    }

    #[test]
    fn test_terminate_after_reading_attributes() {
        // Only the root attribute is described; everything below the root —
        // including elements no schema knows — must be skipped silently.
        let mut settings = SniffSettings::default();
        let schema = SchemaBuilder::<SniffSettings>::new("root")
            .add_attribute(
                "attrNumFoo",
                None,
                setter(|s: &mut SniffSettings, v, _| {
                    s.num_foo = v.parse().map_err(|e| ValueError::new("attrNumFoo", v, e))?;
                    Ok(())
                }),
            )
            .terminate_after_reading_attributes()
            .build();

        let xml = "<root attrNumFoo='1'><StringBar>foo</StringBar>\
                   <Child><GrandChild/></Child></root>";
        deserialize(&schema, &mut settings, xml).expect("termination is not an error");

        assert_eq!(settings.num_foo, 1);
    }

    #[test]
    fn test_terminate_after_reading_element() {
        let mut settings = RepeatSettings::default();
        let schema = SchemaBuilder::<RepeatSettings>::new("root")
            .add_child_element(
                "NumFoo",
                None,
                setter(|s: &mut RepeatSettings, v, _| {
                    s.num_foo = v.parse().map_err(|e| ValueError::new("NumFoo", v, e))?;
                    Ok(())
                }),
            )
            .terminate_after_reading_element()
            .add_element(
                "StringBar",
                None,
                setter(|s: &mut RepeatSettings, v, _| {
                    s.string_bar = Some(v.to_string());
                    Ok(())
                }),
            )
            .build();

        // Junk would be a fatal unknown element, but the parse stops right
        // after NumFoo and never sees it.
        let xml = "<root><NumFoo>1</NumFoo><Junk/><StringBar>foo</StringBar></root>";
        deserialize(&schema, &mut settings, xml).expect("termination is not an error");

        assert_eq!(settings.num_foo, 1);
        assert_eq!(settings.string_bar, None);
    }

    #[test]
    fn test_unknown_element_is_fatal() {
        let mut settings = SniffSettings::default();
        let schema = SchemaBuilder::<SniffSettings>::new("root")
            .add_child_element("Known", None, None)
            .build();

        let result = deserialize(&schema, &mut settings, "<root><Junk>1</Junk></root>");
        assert!(matches!(
            result,
            Err(ReadError::UnknownElement { element, .. }) if element == "Junk"
        ));
    }

    #[test]
    fn test_unknown_attribute_is_fatal_unless_discarded() {
        let mut settings = SniffSettings::default();
        let xml = "<root mystery='1' />";

        let strict = SchemaBuilder::<SniffSettings>::new("root").build();
        let result = deserialize(&strict, &mut settings, xml);
        assert!(matches!(
            result,
            Err(ReadError::UnknownAttribute { attribute, .. }) if attribute == "mystery"
        ));

        let lenient = SchemaBuilder::<SniffSettings>::new("root")
            .discard_unknown_attributes()
            .build();
        deserialize(&lenient, &mut settings, xml).expect("discarded attribute is not an error");
    }

    #[test]
    fn test_setterless_attribute_is_fatal_unless_discarded() {
        let mut settings = SniffSettings::default();
        let xml = "<root attrNumFoo='1' />";

        let strict = SchemaBuilder::<SniffSettings>::new("root")
            .add_attribute("attrNumFoo", None, None)
            .build();
        let result = deserialize(&strict, &mut settings, xml);
        assert!(matches!(
            result,
            Err(ReadError::AttributeWithoutSetter { attribute, .. }) if attribute == "attrNumFoo"
        ));

        let lenient = SchemaBuilder::<SniffSettings>::new("root")
            .add_attribute("attrNumFoo", None, None)
            .discard_attributes_without_setter()
            .build();
        deserialize(&lenient, &mut settings, xml).expect("discarded value is not an error");
    }

    #[test]
    fn test_setterless_element_text_is_fatal_unless_discarded() {
        let mut settings = SniffSettings::default();
        let xml = "<root><NumFoo>1</NumFoo></root>";

        let strict = SchemaBuilder::<SniffSettings>::new("root")
            .add_child_element("NumFoo", None, None)
            .build();
        let result = deserialize(&strict, &mut settings, xml);
        assert!(matches!(
            result,
            Err(ReadError::ElementWithoutSetter { element }) if element == "NumFoo"
        ));

        let lenient = SchemaBuilder::<SniffSettings>::new("root")
            .add_child_element("NumFoo", None, None)
            .discard_attributes_without_setter()
            .build();
        deserialize(&lenient, &mut settings, xml).expect("discarded value is not an error");
    }

    #[test]
    fn test_missing_required_element_is_not_a_read_error() {
        // Required-ness is a write-side contract; a document that simply
        // never mentions the element reads fine and leaves the field alone.
        let mut settings = RepeatSettings::default();
        let schema = SchemaBuilder::<RepeatSettings>::new("root")
            .add_child_element(
                "StringBar",
                getter(|s: &RepeatSettings, _| s.string_bar.clone()),
                setter(|s: &mut RepeatSettings, v, _| {
                    s.string_bar = Some(v.to_string());
                    Ok(())
                }),
            )
            .required()
            .build();

        deserialize(&schema, &mut settings, "<root />").expect("absent element reads fine");
        assert_eq!(settings.string_bar, None);
    }

    #[test]
    fn test_empty_document_is_ok() {
        let mut settings = SniffSettings::default();
        let schema = SchemaBuilder::<SniffSettings>::new("root").build();

        deserialize(&schema, &mut settings, "").expect("empty document is an empty settings file");
        assert_eq!(settings.num_foo, 0);
    }

    #[test]
    fn test_root_mismatch_is_fatal() {
        let mut settings = SniffSettings::default();
        let schema = SchemaBuilder::<SniffSettings>::new("expected").build();

        let result = deserialize(&schema, &mut settings, "<other />");
        assert!(matches!(
            result,
            Err(ReadError::RootMismatch { expected, actual })
                if expected == "expected" && actual == "other"
        ));
    }

    #[test]
    fn test_malformed_xml_is_fatal() {
        let mut settings = SniffSettings::default();
        let schema = SchemaBuilder::<SniffSettings>::new("root")
            .add_child_element("a", None, None)
            .build();

        let result = deserialize(&schema, &mut settings, "<root><a></root>");
        assert!(matches!(result, Err(ReadError::Xml(_))));
    }

    #[test]
    fn test_invalid_value_surfaces_host_error() {
        let mut settings = SniffSettings::default();
        let schema = SchemaBuilder::<SniffSettings>::new("root")
            .add_child_element(
                "NumFoo",
                None,
                setter(|s: &mut SniffSettings, v, _| {
                    s.num_foo = v.parse().map_err(|e| ValueError::new("NumFoo", v, e))?;
                    Ok(())
                }),
            )
            .build();

        let result = deserialize(&schema, &mut settings, "<root><NumFoo>abc</NumFoo></root>");
        assert!(matches!(
            result,
            Err(ReadError::Value(ValueError { value, .. })) if value == "abc"
        ));
    }

    #[test]
    fn test_entities_are_unescaped() {
        #[derive(Default)]
        struct TextSettings {
            text: Option<String>,
            attr: Option<String>,
        }

        let mut settings = TextSettings::default();
        let schema = SchemaBuilder::<TextSettings>::new("root")
            .add_attribute(
                "a",
                None,
                setter(|s: &mut TextSettings, v, _| {
                    s.attr = Some(v.to_string());
                    Ok(())
                }),
            )
            .add_child_element(
                "Text",
                None,
                setter(|s: &mut TextSettings, v, _| {
                    s.text = Some(v.to_string());
                    Ok(())
                }),
            )
            .build();

        let xml = "<root a='x &lt; y'><Text>a &amp; b</Text></root>";
        deserialize(&schema, &mut settings, xml).expect("deserialize failed");

        assert_eq!(settings.attr.as_deref(), Some("x < y"));
        assert_eq!(settings.text.as_deref(), Some("a & b"));
    }

    #[test]
    fn test_nested_commit_happens_before_outer_commit() {
        #[derive(Default)]
        struct CommitLog {
            log: Vec<String>,
        }

        let schema = SchemaBuilder::<CommitLog>::new("root")
            .add_child_element("Outers", None, None)
            .add_child_element("Outer", None, None)
            .set_repeating(
                |_s: &mut CommitLog, _p| (),
                |_s: &mut CommitLog, _p| false,
                |s: &mut CommitLog, _item| s.log.push("commit outer".to_string()),
            )
            .add_child_element(
                "Inner",
                None,
                setter(|s: &mut CommitLog, v, _| {
                    s.log.push(format!("set {v}"));
                    Ok(())
                }),
            )
            .set_repeating(
                |_s: &mut CommitLog, _p| (),
                |_s: &mut CommitLog, _p| false,
                |s: &mut CommitLog, _item| s.log.push("commit inner".to_string()),
            )
            .build();

        let mut log = CommitLog::default();
        let xml = "<root><Outers><Outer><Inner>x</Inner><Inner>y</Inner></Outer></Outers></root>";
        deserialize(&schema, &mut log, xml).expect("deserialize failed");

        assert_eq!(
            log.log,
            vec!["set x", "commit inner", "set y", "commit inner", "commit outer"]
        );
    }
}
