macro_rules! setter {
    ($field:ident : $ty:ty) => {
        pub fn $field<T>(mut self, $field: T) -> Self
        where
            T: Into<$ty>,
        {
            self.$field = $field.into();
            self
        }
    };

    ($field:ident . $subfield:ident : $ty:ty) => {
        pub fn $subfield<T>(mut self, $subfield: T) -> Self
        where
            T: Into<$ty>,
        {
            self.$field.$subfield = $subfield.into();
            self
        }
    };

    (opt $field:ident . $subfield:ident : $ty:ty) => {
        pub fn $subfield<T>(mut self, $subfield: T) -> Self
        where
            T: Into<$ty>,
        {
            self.$field.$subfield = Some($subfield.into());
            self
        }
    };
}

/// Implements [`Envelope`](crate::endpoints::Envelope) for responses carrying a
/// flattened `status` field.
macro_rules! envelope {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::endpoints::Envelope for $ty {
                fn status(&self) -> &$crate::endpoints::Status {
                    &self.status
                }
            }
        )+
    };
}

/// Implements a JSON `POST` request for a body type.
macro_rules! post {
    ($ty:ty => $response:ty, $path:expr) => {
        impl tower_api_client::Request for $ty {
            type Data = Self;
            type Response = $response;
            const METHOD: tower_api_client::Method = tower_api_client::Method::POST;

            fn endpoint(&self) -> std::borrow::Cow<'_, str> {
                $path.into()
            }

            fn data(&self) -> tower_api_client::RequestData<&Self::Data> {
                tower_api_client::RequestData::Json(self)
            }
        }
    };
}

pub(crate) use envelope;
pub(crate) use post;
pub(crate) use setter;
