use proc_macro2::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Attribute, DataEnum, DeriveInput, Fields, FieldsNamed, Ident, Variant};

use super::utils::{clog2, get_enum_encode_value, get_enum_width, get_member_symbol};

pub(super) fn derive(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);
    let name = &ast.ident;
    let body = match &ast.data {
        syn::Data::Struct(syn::DataStruct { fields: Fields::Named(fields), .. }) => struct_body(fields),
        syn::Data::Enum(data) => enum_body(name, &ast.attrs, data),
        _ => panic!("{name}: Signal can only be derived for structs with named fields and unit-only enums"),
    };

    let (impl_generics, ty_generics, where_clause) = ast.generics.split_for_impl();
    let expanded = quote! {
        impl #impl_generics ::micflow::Signal for #name #ty_generics #where_clause {
            #body
        }
    };
    expanded.into()
}

/// Fields are concatenated in declaration order, the first one at the least significant bits.
fn struct_body(fields: &FieldsNamed) -> TokenStream {
    let tys = fields.named.iter().map(|field| &field.ty).collect::<Vec<_>>();
    let idents = fields.named.iter().map(|field| &field.ident);
    let members = fields.named.iter().map(|field| {
        let ty = &field.ty;
        let ident = field.ident.as_ref().expect("named field");
        let symbol = match get_member_symbol(&field.attrs, ident) {
            Some(symbol) => quote! { Some(#symbol.to_string()) },
            None => quote! { None },
        };
        quote! { (#symbol, <#ty as ::micflow::Signal>::port_decls()) }
    });

    quote! {
        const WIDTH: usize = 0 #(+ <#tys as ::micflow::Signal>::WIDTH)*;

        fn transl(self) -> Vec<bool> {
            let mut bits = Vec::with_capacity(Self::WIDTH);
            #(bits.extend(::micflow::Signal::transl(self.#idents));)*
            bits
        }

        fn port_decls() -> ::micflow::PortDecls { ::micflow::PortDecls::Struct(vec![#(#members),*]) }
    }
}

fn enum_body(name: &Ident, attrs: &[Attribute], data: &DataEnum) -> TokenStream {
    let variants = data.variants.iter().collect::<Vec<_>>();
    assert!(!variants.is_empty(), "{name}: empty enums have no encoding");

    let width = match get_enum_width(attrs) {
        Some(width) => width.base10_parse::<usize>().unwrap_or_else(|_| panic!("{name}: #[width] must be a usize")),
        None => clog2(variants.len()).max(1),
    };

    let codes =
        variants.iter().enumerate().map(|(index, variant)| encoding(name, variant, index, width)).collect::<Vec<_>>();
    for (i, code) in codes.iter().enumerate() {
        if let Some(j) = codes[..i].iter().position(|other| other == code) {
            panic!("{name}: {} and {} are both encoded as {code}", variants[j].ident, variants[i].ident);
        }
    }

    let arms = variants.iter().zip(&codes).map(|(variant, code)| {
        let ident = &variant.ident;
        quote! { Self::#ident => #code, }
    });

    quote! {
        const WIDTH: usize = #width;

        fn transl(self) -> Vec<bool> {
            let code: usize = match self { #(#arms)* };
            (0..Self::WIDTH).map(|i| (code >> i) & 1 == 1).collect()
        }

        fn port_decls() -> ::micflow::PortDecls { ::micflow::PortDecls::Bits(Self::WIDTH) }
    }
}

/// Code of a variant: its `#[encode(N)]` value, or its index.
fn encoding(name: &Ident, variant: &Variant, index: usize, width: usize) -> usize {
    let ident = &variant.ident;
    assert!(matches!(variant.fields, Fields::Unit), "{name}::{ident}: only unit variants can be encoded");

    let code = match get_enum_encode_value(&variant.attrs) {
        Some(code) => {
            code.base10_parse::<usize>().unwrap_or_else(|_| panic!("{name}::{ident}: #[encode] must be a usize"))
        }
        None => index,
    };
    let fits = width >= usize::BITS as usize || code >> width == 0;
    assert!(fits, "{name}::{ident}: {code} does not fit in {width} bits");
    code
}
