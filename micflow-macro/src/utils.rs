use syn::{Attribute, Ident, Lit, LitInt, LitStr, Meta, MetaList, NestedMeta};

pub(super) fn clog2(value: usize) -> usize {
    if value <= 1 {
        0
    } else {
        (usize::BITS - (value - 1).leading_zeros()) as usize
    }
}

/// Arguments of every `#[ident(...)]` attribute.
fn lists<'a>(attrs: &'a [Attribute], ident: &'a str) -> impl Iterator<Item = NestedMeta> + 'a {
    attrs
        .iter()
        .filter_map(move |attr| match attr.parse_meta() {
            Ok(Meta::List(MetaList { path, nested, .. })) if path.is_ident(ident) => Some(nested),
            _ => None,
        })
        .flatten()
}

fn get_list_int(attrs: &[Attribute], ident: &str) -> Option<LitInt> {
    lists(attrs, ident).find_map(|nested| match nested {
        NestedMeta::Lit(Lit::Int(value)) => Some(value),
        _ => None,
    })
}

pub(super) fn get_enum_width(attrs: &[Attribute]) -> Option<LitInt> { get_list_int(attrs, "width") }

pub(super) fn get_enum_encode_value(attrs: &[Attribute]) -> Option<LitInt> { get_list_int(attrs, "encode") }

/// Port name of a struct member: the field name unless renamed by `#[member(name = "...")]`.
///
/// An empty name flattens the member into its parent, so `None` is returned.
pub(super) fn get_member_symbol(attrs: &[Attribute], ident: &Ident) -> Option<LitStr> {
    let renamed = lists(attrs, "member").find_map(|nested| match nested {
        NestedMeta::Meta(Meta::NameValue(nv)) if nv.path.is_ident("name") => Some(nv.lit),
        _ => None,
    });

    match renamed {
        None => Some(LitStr::new(&ident.to_string(), ident.span())),
        Some(Lit::Str(name)) if name.value().is_empty() => None,
        Some(Lit::Str(name)) => Some(name),
        Some(lit) => panic!("{ident}: member name must be a string literal, found {lit:?}"),
    }
}
