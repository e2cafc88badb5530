//! Derives wrapping a state change or event struct into its enum variant.
use proc_macro::TokenStream;
use quote::quote;
use syn::{
	parse_macro_input,
	DeriveInput,
};

/// Generates `From<T> for Event`, wrapping `T` in the variant of the same name.
#[proc_macro_derive(IntoEvent)]
pub fn into_event(input: TokenStream) -> TokenStream {
	let input = parse_macro_input!(input as DeriveInput);
	let name = input.ident;

	let expanded = quote! {
		impl From<#name> for Event {
			fn from(inner: #name) -> Event {
				Event::#name(inner)
			}
		}
	};

	TokenStream::from(expanded)
}

/// Generates `From<T> for StateChange`, wrapping `T` in the variant of the same name.
#[proc_macro_derive(IntoStateChange)]
pub fn into_state_change(input: TokenStream) -> TokenStream {
	let input = parse_macro_input!(input as DeriveInput);
	let name = input.ident;

	let expanded = quote! {
		impl From<#name> for StateChange {
			fn from(inner: #name) -> StateChange {
				StateChange::#name(inner)
			}
		}
	};

	TokenStream::from(expanded)
}
