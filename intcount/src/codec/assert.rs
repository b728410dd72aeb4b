// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::io;

use crate::error::Error;

pub(crate) fn insufficient_data(tag: &'static str) -> impl FnOnce(io::Error) -> Error {
    move |err| {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            Error::insufficient_data(tag)
        } else {
            Error::deserial(format!("failed to read {tag}")).set_source(err)
        }
    }
}

pub(crate) fn ensure_entry_count_valid(count: i32, max: usize) -> Result<usize, Error> {
    if count < 0 {
        return Err(Error::deserial("negative entry count").with_context("count", count));
    }
    let count = count as usize;
    if count > max {
        return Err(Error::deserial(format!(
            "entry count {count} exceeds the maximum of {max}"
        )));
    }
    Ok(count)
}

pub(crate) fn ensure_key_unique(is_duplicate: bool, key: i32) -> Result<(), Error> {
    if is_duplicate {
        Err(Error::deserial("duplicate key in serialized entries").with_context("key", key))
    } else {
        Ok(())
    }
}

pub(crate) fn ensure_fully_consumed(remaining: &[u8]) -> Result<(), Error> {
    if remaining.is_empty() {
        Ok(())
    } else {
        Err(Error::deserial(format!(
            "{} trailing bytes after serialized data",
            remaining.len()
        )))
    }
}
