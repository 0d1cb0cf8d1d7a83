//! Универсальные макросы для приложений сбора курсов.
use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, LitStr, parse_macro_input};

/// Derive-макрос для `Enum`: автоматически добавляет реализации
/// [`std::fmt::Display`] и [`std::str::FromStr`].
///
/// Метка варианта задаётся атрибутом `#[str("...")]`, без него используется
/// имя варианта в нижнем регистре. `FromStr` возвращает
/// `RatesError::ValueError`, поэтому `RatesError` должен быть в области
/// видимости.
///
/// ## Пример
///
/// ```ignore
/// use commons::errors::RatesError;
/// use macros::EnumDisplay;
///
/// #[derive(Debug, Clone, EnumDisplay)]
/// enum Stage {
///     #[str("producer_done")]
///     ProducerDone,
///     Complete,
/// }
///
/// assert_eq!(Stage::ProducerDone.to_string(), "producer_done");
/// assert_eq!(Stage::Complete.to_string(), "complete");
/// ```
#[proc_macro_derive(EnumDisplay, attributes(str))]
pub fn derive_enum_display(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let variants = match input.data {
        Data::Enum(e) => e.variants,
        _ => panic!("EnumDisplay допустимо использовать только с enum"),
    };

    let mut to_arms = Vec::new();
    let mut from_arms = Vec::new();

    for v in variants {
        let ident = v.ident;
        if !matches!(v.fields, Fields::Unit) {
            panic!("EnumDisplay: только unit-variants");
        }
        let mut label = ident.to_string().to_lowercase();
        for attr in v.attrs {
            if attr.path().is_ident("str") {
                let s: LitStr = attr.parse_args().expect("ожидается str(\"...\")");
                label = s.value();
            }
        }
        let lit = LitStr::new(&label, proc_macro2::Span::call_site());
        to_arms.push(quote! { #name::#ident => f.write_str(#lit), });
        from_arms.push(quote! { #lit => Ok(#name::#ident), });
    }

    let expanded = quote! {
        impl std::fmt::Display for #name {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                match self { #(#to_arms)* }
            }
        }

        impl std::str::FromStr for #name {
            type Err = RatesError;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    #(#from_arms)*
                    _ => Err(RatesError::value_err(format!(
                        "некорректное значение {}: {}",
                        stringify!(#name), s
                    ))),
                }
            }
        }
    };

    TokenStream::from(expanded)
}
