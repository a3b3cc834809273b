use crate::data_backend::{absolute_photo_url, KitchenBackend};
use crate::data_types::dish_data_types::Dish;
use crate::data_types::RequestStatus;

/// Dishes as stored by the backend, with at most one of them selected.
#[derive(Debug, Default)]
pub struct DishList {
    dishes: Vec<Dish>,
    status: RequestStatus,
    selected: Option<String>,
}

impl DishList {
    pub async fn fetch<B: KitchenBackend>(&mut self, backend: &B) {
        self.status = RequestStatus::Submitting;

        match backend.get_dishes().await {
            Ok(dishes) => {
                self.dishes = dishes
                    .into_iter()
                    .map(|dish| Dish {
                        photo: absolute_photo_url(backend.base_url(), &dish.photo),
                        ..dish
                    })
                    .collect();
            }
            // the list just stays as it was
            Err(e) => log::error!("Error fetching dishes: {}", e),
        }

        self.status = RequestStatus::Idle;
    }

    /// Selecting the selected dish again clears the selection.
    pub fn select(&mut self, dish_id: &str) {
        if self.selected.as_deref() == Some(dish_id) {
            self.selected = None;
        } else {
            self.selected = Some(dish_id.to_string());
        }
    }

    pub fn is_selected(&self, dish: &Dish) -> bool {
        dish.id.is_some() && dish.id == self.selected
    }

    pub fn dishes(&self) -> &[Dish] {
        &self.dishes
    }

    pub fn is_loading(&self) -> bool {
        self.status == RequestStatus::Submitting
    }
}

pub fn dish_card_to_msg(dish: &Dish, is_selected: bool) -> String {
    let mut msg = String::new();

    let marker = if is_selected { "✔" } else { "•" };
    msg += &format!(" {} {}\n", marker, dish.name);
    msg += &format!("   ${:.2}  ·  {} ingredients\n", dish.price, dish.ingredients.len());
    msg += &format!("   {}\n", dish.photo);

    msg
}

pub fn dish_collection_to_msg(list: &DishList) -> String {
    if list.is_loading() {
        return "Loading dishes...\n".to_string();
    }
    if list.dishes().is_empty() {
        return "No dishes yet. Create your first dish!\n".to_string();
    }

    let mut msg = String::from("Dish Collection\n");
    for dish in list.dishes() {
        msg += "\n";
        msg += &dish_card_to_msg(dish, list.is_selected(dish));
        if !dish.ingredients.is_empty() {
            msg += "   Ingredients:\n";
            for ingredient in &dish.ingredients {
                msg += &format!("     + {}\n", ingredient);
            }
        }
    }

    msg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_backend::fake_backend::FakeBackend;
    use crate::data_types::dish_data_types::DishIngredient;
    use crate::errors::BackendError;

    fn dish(id: &str, photo: &str) -> Dish {
        Dish {
            id: Some(id.to_string()),
            name: format!("Dish {}", id),
            photo: photo.to_string(),
            price: 9.5,
            ingredients: vec![
                DishIngredient::from("Rice"),
                DishIngredient::Measured {
                    name: "Saffron".to_string(),
                    quantity: 2.0,
                    unit: "g".to_string(),
                },
            ],
        }
    }

    #[tokio::test]
    async fn fetch_resolves_relative_photos() {
        let backend = FakeBackend {
            dishes: Ok(vec![
                dish("1", "/uploads/x.png"),
                dish("2", "https://cdn.example.com/y.png"),
            ]),
            ..Default::default()
        };
        let mut list = DishList::default();

        list.fetch(&backend).await;

        assert!(!list.is_loading());
        assert_eq!(list.dishes()[0].photo, "http://localhost:5001/uploads/x.png");
        assert_eq!(list.dishes()[1].photo, "https://cdn.example.com/y.png");
    }

    #[tokio::test]
    async fn failed_fetch_keeps_previous_dishes() {
        let mut list = DishList::default();
        let backend = FakeBackend {
            dishes: Ok(vec![dish("1", "/uploads/x.png")]),
            ..Default::default()
        };
        list.fetch(&backend).await;

        let broken = FakeBackend {
            dishes: Err(BackendError::Network("reset".to_string())),
            ..Default::default()
        };
        list.fetch(&broken).await;

        assert_eq!(list.dishes().len(), 1);
        assert!(!list.is_loading());
    }

    #[test]
    fn selection_toggles() {
        let mut list = DishList::default();
        let paella = dish("1", "/p.png");

        list.select("1");
        assert!(list.is_selected(&paella));
        list.select("1");
        assert!(!list.is_selected(&paella));
    }

    #[test]
    fn empty_and_filled_collections_render() {
        let list = DishList::default();
        assert!(dish_collection_to_msg(&list).starts_with("No dishes yet"));

        let card = dish_card_to_msg(&dish("1", "/p.png"), true);
        assert!(card.contains("$9.50"));
        assert!(card.contains("2 ingredients"));
        assert!(card.contains('✔'));
    }
}
