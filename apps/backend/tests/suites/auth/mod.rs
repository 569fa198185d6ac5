mod jwt_interop;
mod token_codec;
